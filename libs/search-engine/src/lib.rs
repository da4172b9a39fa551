//! Tag based page discovery: exact tag lookup and pages ranked by shared tags.
mod searcher;

pub use searcher::*;
