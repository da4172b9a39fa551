pub mod headers;
pub mod html;

pub use self::headers::*;
pub use self::html::*;
