//! # Contracts
//!
//! Frozen interface contracts shared by every logroute crate.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Capability model
//! - [`MessageFilter`] renders an accept/reject verdict over a [`Message`]
//! - [`MessageHandler`] delivers an accepted [`Message`] to an external sink
//! - The dispatcher composes both; neither knows about the other

mod blueprint;
mod error;
mod filter;
mod handler;
mod message;
mod severity;

pub use blueprint::*;
pub use error::*;
pub use filter::MessageFilter;
pub use handler::MessageHandler;
pub use message::Message;
pub use severity::Severity;
