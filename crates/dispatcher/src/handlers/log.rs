//! LogHandler - forwards messages to the tracing facility

use contracts::{ContractError, Message, MessageHandler, Severity};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Handler that emits each message as a tracing event
///
/// The configured severity plays the role of a syslog priority: it picks the
/// tracing level and is recorded as the `priority` field.
pub struct LogHandler {
    name: String,
    level: Severity,
}

impl LogHandler {
    /// Create a new LogHandler at the given level
    pub fn new(name: impl Into<String>, level: Severity) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    /// Create from params (for registry)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let level = match params.get("level") {
            Some(level) => level
                .parse()
                .map_err(|e: String| ContractError::config_validation(&name, e))?,
            None => Severity::Info,
        };
        Ok(Self::new(name, level))
    }

    /// Configured priority
    pub fn level(&self) -> Severity {
        self.level
    }
}

impl MessageHandler for LogHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, message: &Message) -> Result<(), ContractError> {
        let priority = self.level.as_str();
        match self.level {
            Severity::Debug => debug!(handler = %self.name, priority, "{}", message),
            Severity::Info | Severity::Notice => {
                info!(handler = %self.name, priority, "{}", message)
            }
            Severity::Warning => warn!(handler = %self.name, priority, "{}", message),
            Severity::Error | Severity::Critical => {
                error!(handler = %self.name, priority, "{}", message)
            }
        }
        Ok(())
    }
}
