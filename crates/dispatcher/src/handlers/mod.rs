//! Handler implementations
//!
//! Contains StreamHandler, SocketHandler, LogHandler, and MemoryHandler.

mod log;
mod memory;
mod socket;
mod stream;

pub use self::log::LogHandler;
pub use self::memory::MemoryHandler;
pub use self::socket::{SocketHandler, SocketHandlerConfig};
pub use self::stream::{StreamHandler, StreamHandlerConfig};
