//! MessageHandler trait - Dispatcher output interface
//!
//! Defines the abstract interface for handlers.

use crate::{ContractError, Message};

/// Message delivery trait
///
/// All handler implementations must implement this trait.
///
/// `emit` takes `&self` and handlers are `Sync`, so a shared dispatcher may
/// call the same handler from several threads at once. Implementations that
/// own a stream or connection must serialize writes to it internally.
pub trait MessageHandler: Send + Sync {
    /// Handler name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver an accepted message
    ///
    /// When this returns `Ok`, the message has been handed to the underlying
    /// sink; nothing is left buffered inside the handler.
    ///
    /// # Errors
    /// Returns the sink failure (should include context)
    fn emit(&self, message: &Message) -> Result<(), ContractError>;

    /// Flush the underlying sink (if it buffers)
    fn flush(&self) -> Result<(), ContractError> {
        Ok(())
    }
}

impl<H: MessageHandler + ?Sized> MessageHandler for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&self, message: &Message) -> Result<(), ContractError> {
        (**self).emit(message)
    }

    fn flush(&self) -> Result<(), ContractError> {
        (**self).flush()
    }
}
