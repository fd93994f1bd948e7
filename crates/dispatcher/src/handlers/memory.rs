//! MemoryHandler - captures messages in process

use contracts::{ContractError, Message, MessageHandler};
use parking_lot::Mutex;
use std::sync::Arc;

/// Handler that records every emitted message in order
///
/// Clones share the same buffer, so a clone kept by the caller observes
/// what the dispatcher delivered. `fail_with` turns the handler into a
/// broken sink until `recover` is called.
#[derive(Clone, Default)]
pub struct MemoryHandler {
    name: String,
    captured: Arc<Mutex<Vec<Message>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MemoryHandler {
    /// Create an empty MemoryHandler
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Messages captured so far, in delivery order
    pub fn captured(&self) -> Vec<Message> {
        self.captured.lock().clone()
    }

    /// Captured message texts
    pub fn texts(&self) -> Vec<String> {
        self.captured.lock().iter().map(Message::to_string).collect()
    }

    /// Number of captured messages
    pub fn len(&self) -> usize {
        self.captured.lock().len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.captured.lock().is_empty()
    }

    /// Drop captured messages
    pub fn clear(&self) {
        self.captured.lock().clear();
    }

    /// Fail every subsequent emit with the given reason
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock() = Some(reason.into());
    }

    /// Accept messages again
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }
}

impl MessageHandler for MemoryHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, message: &Message) -> Result<(), ContractError> {
        if let Some(reason) = self.failure.lock().as_ref() {
            return Err(ContractError::handler_emit(&self.name, reason.clone()));
        }
        self.captured.lock().push(message.clone());
        Ok(())
    }
}
