mod clock;
pub mod format;
mod save_system;
mod storage;

pub use clock::{Clock, SystemClock};
pub use save_system::{SaveSystem, DEFAULT_LIST_LIMIT};
pub use storage::{FileStorage, MemoryStorage, SaveStorage};
