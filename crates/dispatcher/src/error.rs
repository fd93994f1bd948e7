//! Dispatcher error types

use contracts::ContractError;
use thiserror::Error;

/// A single handler failure collected during best-effort delivery
#[derive(Debug)]
pub struct HandlerFailure {
    /// Name of the failing handler
    pub handler: String,
    /// The sink error it reported
    pub error: ContractError,
}

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Filter creation error
    #[error("failed to create filter '{name}': {message}")]
    FilterCreation { name: String, message: String },

    /// Handler creation error
    #[error("failed to create handler '{name}': {message}")]
    HandlerCreation { name: String, message: String },

    /// No constructor registered for the configured kind
    #[error("unknown {component} kind '{kind}'")]
    UnknownKind {
        component: &'static str,
        kind: String,
    },

    /// A filter could not evaluate the message; no handler was invoked
    #[error("filter '{filter}' failed")]
    Filter {
        filter: String,
        #[source]
        source: ContractError,
    },

    /// A handler failed and delivery stopped there
    #[error("handler '{handler}' failed")]
    Handler {
        handler: String,
        #[source]
        source: ContractError,
    },

    /// One or more handlers failed during best-effort delivery
    #[error("delivery failed for handlers [{}]", failed_names(.failures))]
    Delivery { failures: Vec<HandlerFailure> },
}

impl DispatcherError {
    /// Create a filter creation error
    pub fn filter_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FilterCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a handler creation error
    pub fn handler_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an unknown kind error
    pub fn unknown_kind(component: &'static str, kind: impl Into<String>) -> Self {
        Self::UnknownKind {
            component,
            kind: kind.into(),
        }
    }

    /// Names of the handlers this error reports as failed
    pub fn failed_handlers(&self) -> Vec<&str> {
        match self {
            Self::Handler { handler, .. } => vec![handler.as_str()],
            Self::Delivery { failures } => failures.iter().map(|f| f.handler.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn failed_names(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(|f| f.handler.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error_lists_handlers() {
        let err = DispatcherError::Delivery {
            failures: vec![
                HandlerFailure {
                    handler: "a".into(),
                    error: ContractError::handler_emit("a", "closed"),
                },
                HandlerFailure {
                    handler: "c".into(),
                    error: ContractError::handler_emit("c", "reset"),
                },
            ],
        };
        assert_eq!(err.to_string(), "delivery failed for handlers [a, c]");
        assert_eq!(err.failed_handlers(), vec!["a", "c"]);
    }

    #[test]
    fn test_handler_error_keeps_source() {
        use std::error::Error;

        let err = DispatcherError::Handler {
            handler: "net".into(),
            source: ContractError::handler_emit("net", "broken pipe"),
        };
        assert_eq!(err.failed_handlers(), vec!["net"]);
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("broken pipe"));
    }
}
