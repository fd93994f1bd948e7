//! Filter and handler registries
//!
//! Map a configuration `kind` to a constructor so that the filter and the
//! handler of a route are selected independently at runtime.

use std::collections::HashMap;

use contracts::{ContractError, FilterConfig, HandlerConfig, MessageFilter, MessageHandler};
use tracing::instrument;

use crate::error::DispatcherError;
use crate::filters::{RegexFilter, SeverityFilter, TextFilter};
use crate::handlers::{LogHandler, SocketHandler, StreamHandler};

/// Builds a filter from its configuration
pub type FilterConstructor =
    Box<dyn Fn(&FilterConfig) -> Result<Box<dyn MessageFilter>, ContractError> + Send + Sync>;

/// Builds a handler from its configuration
pub type HandlerConstructor =
    Box<dyn Fn(&HandlerConfig) -> Result<Box<dyn MessageHandler>, ContractError> + Send + Sync>;

/// Registry of filter constructors keyed by kind
pub struct FilterRegistry {
    constructors: HashMap<String, FilterConstructor>,
}

impl FilterRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with the built-in kinds: `text`, `severity`, `regex`
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("text", |config| {
            Ok(Box::new(TextFilter::from_params(config.label(), &config.params)?))
        });
        registry.register("severity", |config| {
            Ok(Box::new(SeverityFilter::from_params(config.label(), &config.params)?))
        });
        registry.register("regex", |config| {
            Ok(Box::new(RegexFilter::from_params(config.label(), &config.params)?))
        });
        registry
    }

    /// Register (or replace) the constructor for a kind
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn(&FilterConfig) -> Result<Box<dyn MessageFilter>, ContractError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(kind.into(), Box::new(constructor));
    }

    /// Whether a kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Construct a filter from configuration
    #[instrument(
        name = "filter_registry_create",
        skip(self, config),
        fields(filter = %config.label(), kind = %config.kind)
    )]
    pub fn create(&self, config: &FilterConfig) -> Result<Box<dyn MessageFilter>, DispatcherError> {
        let constructor = self
            .constructors
            .get(&config.kind)
            .ok_or_else(|| DispatcherError::unknown_kind("filter", &config.kind))?;

        constructor(config)
            .map_err(|e| DispatcherError::filter_creation(config.label(), e.to_string()))
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Registry of handler constructors keyed by kind
pub struct HandlerRegistry {
    constructors: HashMap<String, HandlerConstructor>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with the built-in kinds: `stdout`, `stderr`, `file`, `socket`, `log`
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("stdout", |config| {
            Ok(Box::new(StreamHandler::stdout(&config.name)))
        });
        registry.register("stderr", |config| {
            Ok(Box::new(StreamHandler::stderr(&config.name)))
        });
        registry.register("file", |config| {
            Ok(Box::new(StreamHandler::from_params(&config.name, &config.params)?))
        });
        registry.register("socket", |config| {
            Ok(Box::new(SocketHandler::from_params(&config.name, &config.params)?))
        });
        registry.register("log", |config| {
            Ok(Box::new(LogHandler::from_params(&config.name, &config.params)?))
        });
        registry
    }

    /// Register (or replace) the constructor for a kind
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn(&HandlerConfig) -> Result<Box<dyn MessageHandler>, ContractError>
            + Send
            + Sync
            + 'static,
    {
        self.constructors.insert(kind.into(), Box::new(constructor));
    }

    /// Whether a kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Construct a handler from configuration
    #[instrument(
        name = "handler_registry_create",
        skip(self, config),
        fields(handler = %config.name, kind = %config.kind)
    )]
    pub fn create(
        &self,
        config: &HandlerConfig,
    ) -> Result<Box<dyn MessageHandler>, DispatcherError> {
        let constructor = self
            .constructors
            .get(&config.kind)
            .ok_or_else(|| DispatcherError::unknown_kind("handler", &config.kind))?;

        constructor(config)
            .map_err(|e| DispatcherError::handler_creation(&config.name, e.to_string()))
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
