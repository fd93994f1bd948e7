//! RouteBlueprint - Config Loader output
//!
//! Describes a complete route: which filters gate messages, which handlers
//! receive them, and how handler failures are treated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete route configuration blueprint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Behavior when a handler fails during fan-out
    #[serde(default)]
    pub delivery: DeliveryPolicy,

    /// Filters, evaluated in order
    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Handlers, invoked in order
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

/// What the dispatcher does when a handler's `emit` fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Abort the fan-out at the first failing handler and return its error
    #[default]
    StopOnError,
    /// Invoke every handler, then report all failures together
    BestEffort,
}

/// Filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Registry key (e.g., "text", "severity", "regex")
    pub kind: String,

    /// Optional display name, defaults to `kind`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Filter-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl FilterConfig {
    /// Create a filter config with no parameters
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            params: HashMap::new(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Name used in logs and errors
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

/// Handler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Unique handler name
    pub name: String,

    /// Registry key (e.g., "stdout", "file", "socket", "log")
    pub kind: String,

    /// Handler-specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl HandlerConfig {
    /// Create a handler config with no parameters
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}
