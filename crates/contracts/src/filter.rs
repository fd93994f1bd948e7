//! MessageFilter trait - Dispatcher input predicate
//!
//! Defines the abstract interface for filters.

use crate::{ContractError, Message};

/// Accept/reject predicate over a message
///
/// Implementations must be pure: the verdict depends only on the message
/// and the filter's own immutable configuration, never on dispatch history.
pub trait MessageFilter: Send + Sync {
    /// Filter name (used for logging/errors)
    fn name(&self) -> &str;

    /// Render a verdict for the message
    fn matches(&self, message: &Message) -> bool;

    /// Render a verdict, reporting malformed input as an error
    ///
    /// The dispatcher always calls this method. The default never fails.
    ///
    /// # Errors
    /// Returns [`ContractError::FilterEvaluation`] when no verdict can be rendered
    fn evaluate(&self, message: &Message) -> Result<bool, ContractError> {
        Ok(self.matches(message))
    }
}

impl<F: MessageFilter + ?Sized> MessageFilter for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn matches(&self, message: &Message) -> bool {
        (**self).matches(message)
    }

    fn evaluate(&self, message: &Message) -> Result<bool, ContractError> {
        (**self).evaluate(message)
    }
}
