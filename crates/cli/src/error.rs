//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Route file not found
    #[error("Route file not found: {path}")]
    ConfigNotFound { path: String },

    /// Route file failed to parse or validate
    #[error("Invalid route file {path}: {message}")]
    ConfigInvalid { path: String, message: String },

    /// Dispatcher could not be assembled from the route
    #[error("Failed to set up dispatcher: {message}")]
    DispatcherSetup { message: String },

    /// Reading input failed
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn dispatcher_setup(message: impl Into<String>) -> Self {
        Self::DispatcherSetup {
            message: message.into(),
        }
    }
}
