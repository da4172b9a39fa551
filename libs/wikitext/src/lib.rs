pub mod parsers;
pub mod processors;
pub mod slug;

pub use self::parsers::*;
pub use self::processors::tags::{tag_string_from_vec, TagsArray};
pub use self::slug::*;
