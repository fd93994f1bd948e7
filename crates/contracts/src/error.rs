//! Layered error definitions
//!
//! Categorized by source: config / filter / handler

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Filter Errors =====
    /// Filter could not render a verdict for the message
    #[error("filter '{filter}' evaluation error: {message}")]
    FilterEvaluation { filter: String, message: String },

    // ===== Handler Errors =====
    /// Handler sink rejected or failed to accept the message
    #[error("handler '{handler}' emit error: {message}")]
    HandlerEmit { handler: String, message: String },

    /// Handler could not reach its sink
    #[error("handler '{handler}' connection error: {message}")]
    HandlerConnection { handler: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create filter evaluation error
    pub fn filter_evaluation(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FilterEvaluation {
            filter: filter.into(),
            message: message.into(),
        }
    }

    /// Create handler emit error
    pub fn handler_emit(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerEmit {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create handler connection error
    pub fn handler_connection(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerConnection {
            handler: handler.into(),
            message: message.into(),
        }
    }
}
