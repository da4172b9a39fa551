pub mod draft;
pub mod error;
pub mod page;
pub mod status;

pub use self::draft::*;
pub use self::error::*;
pub use self::page::*;
pub use self::status::*;
