pub mod fs;
pub mod memory;
pub mod store;

pub use self::memory::MemoryStore;
pub use self::store::*;
