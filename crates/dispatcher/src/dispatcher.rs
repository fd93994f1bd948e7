//! Dispatcher - filter gate followed by ordered fan-out to handlers

use contracts::{DeliveryPolicy, Message, MessageFilter, MessageHandler, RouteBlueprint};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{DispatcherError, HandlerFailure};
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::registry::{FilterRegistry, HandlerRegistry};

/// Filter decision for a dispatched message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every filter accepted; handlers were invoked
    Accepted,
    /// Some filter rejected; no handler was invoked
    Rejected,
}

/// Builder for creating a Dispatcher
#[derive(Default)]
pub struct DispatcherBuilder {
    filters: Vec<Box<dyn MessageFilter>>,
    handlers: Vec<Box<dyn MessageHandler>>,
    delivery: DeliveryPolicy,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder with no filters and no handlers
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter
    pub fn filter(mut self, filter: impl MessageFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Append an already boxed filter
    pub fn boxed_filter(mut self, filter: Box<dyn MessageFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a handler
    pub fn handler(mut self, handler: impl MessageHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Append an already boxed handler
    pub fn boxed_handler(mut self, handler: Box<dyn MessageHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Set the handler failure policy
    pub fn delivery(mut self, delivery: DeliveryPolicy) -> Self {
        self.delivery = delivery;
        self
    }

    /// Build the dispatcher
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            filters: self.filters,
            handlers: self.handlers,
            delivery: self.delivery,
            metrics: DispatchMetrics::new(),
        }
    }
}

/// Forwards a message to every handler iff every filter accepts it
///
/// Filters run in registration order and stop at the first rejection.
/// Handlers run in registration order on the calling thread.
pub struct Dispatcher {
    filters: Vec<Box<dyn MessageFilter>>,
    handlers: Vec<Box<dyn MessageHandler>>,
    delivery: DeliveryPolicy,
    metrics: DispatchMetrics,
}

impl Dispatcher {
    /// Create a dispatcher with the default delivery policy
    pub fn new(
        filters: Vec<Box<dyn MessageFilter>>,
        handlers: Vec<Box<dyn MessageHandler>>,
    ) -> Self {
        Self {
            filters,
            handlers,
            delivery: DeliveryPolicy::default(),
            metrics: DispatchMetrics::new(),
        }
    }

    /// Start building a dispatcher
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Append a filter after construction
    pub fn add_filter(&mut self, filter: impl MessageFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Append a handler after construction
    pub fn add_handler(&mut self, handler: impl MessageHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Number of registered filters
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Handler names in invocation order
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Handler failure policy
    pub fn delivery(&self) -> DeliveryPolicy {
        self.delivery
    }

    /// Get dispatch metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Filter verdict alone, without invoking any handler
    ///
    /// # Errors
    /// Returns [`DispatcherError::Filter`] if a filter cannot evaluate the message
    pub fn accepts(&self, message: &Message) -> Result<bool, DispatcherError> {
        for filter in &self.filters {
            match filter.evaluate(message) {
                Ok(true) => {}
                Ok(false) => {
                    trace!(filter = filter.name(), "Message rejected");
                    return Ok(false);
                }
                Err(source) => {
                    return Err(DispatcherError::Filter {
                        filter: filter.name().to_string(),
                        source,
                    });
                }
            }
        }
        Ok(true)
    }

    /// Dispatch a message
    ///
    /// Rejected messages are dropped silently. Accepted messages go to every
    /// handler; what happens after a handler fails depends on [`DeliveryPolicy`].
    ///
    /// # Errors
    /// - [`DispatcherError::Filter`]: a filter failed, no handler was invoked
    /// - [`DispatcherError::Handler`]: `StopOnError` and a handler failed
    /// - [`DispatcherError::Delivery`]: `BestEffort` and one or more handlers failed
    pub fn dispatch(&self, message: &Message) -> Result<(), DispatcherError> {
        self.route(message).map(|_| ())
    }

    /// Dispatch a message and report whether the filters accepted it
    ///
    /// Same semantics and errors as [`Dispatcher::dispatch`].
    pub fn route(&self, message: &Message) -> Result<Verdict, DispatcherError> {
        let accepted = self.accepts(message).inspect_err(|e| {
            self.metrics.inc_filter_errors();
            warn!(error = %e, "Filter evaluation failed, message dropped");
        })?;

        if !accepted {
            self.metrics.inc_rejected();
            return Ok(Verdict::Rejected);
        }

        self.metrics.inc_accepted();
        debug!(handlers = self.handlers.len(), "Message accepted");

        match self.delivery {
            DeliveryPolicy::StopOnError => self.deliver_until_failure(message)?,
            DeliveryPolicy::BestEffort => self.deliver_to_all(message)?,
        }
        Ok(Verdict::Accepted)
    }

    /// Flush every handler, stopping at the first failure
    pub fn flush(&self) -> Result<(), DispatcherError> {
        for handler in &self.handlers {
            handler.flush().map_err(|source| DispatcherError::Handler {
                handler: handler.name().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    fn deliver_until_failure(&self, message: &Message) -> Result<(), DispatcherError> {
        for handler in &self.handlers {
            if let Err(source) = handler.emit(message) {
                self.metrics.inc_handler_failures();
                warn!(handler = handler.name(), error = %source, "Emit failed, delivery stopped");
                return Err(DispatcherError::Handler {
                    handler: handler.name().to_string(),
                    source,
                });
            }
            self.metrics.inc_delivered();
        }
        Ok(())
    }

    fn deliver_to_all(&self, message: &Message) -> Result<(), DispatcherError> {
        let mut failures = Vec::new();

        for handler in &self.handlers {
            match handler.emit(message) {
                Ok(()) => self.metrics.inc_delivered(),
                Err(error) => {
                    self.metrics.inc_handler_failures();
                    warn!(handler = handler.name(), error = %error, "Emit failed, continuing");
                    failures.push(HandlerFailure {
                        handler: handler.name().to_string(),
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(DispatcherError::Delivery { failures })
        }
    }
}

/// Build a dispatcher from a blueprint using the given registries
///
/// Filters and handlers keep their configuration order.
#[instrument(
    name = "dispatcher_build",
    skip(blueprint, filters, handlers),
    fields(
        filter_count = blueprint.filters.len(),
        handler_count = blueprint.handlers.len(),
        delivery = ?blueprint.delivery
    )
)]
pub fn build_dispatcher(
    blueprint: &RouteBlueprint,
    filters: &FilterRegistry,
    handlers: &HandlerRegistry,
) -> Result<Dispatcher, DispatcherError> {
    let mut builder = DispatcherBuilder::new().delivery(blueprint.delivery);

    for config in &blueprint.filters {
        builder = builder.boxed_filter(filters.create(config)?);
    }
    for config in &blueprint.handlers {
        builder = builder.boxed_handler(handlers.create(config)?);
    }

    let dispatcher = builder.build();
    info!(
        filters = dispatcher.filter_count(),
        handlers = ?dispatcher.handler_names(),
        "Dispatcher ready"
    );
    Ok(dispatcher)
}

/// Convenience function to create a dispatcher with the built-in registries
pub fn create_dispatcher(blueprint: &RouteBlueprint) -> Result<Dispatcher, DispatcherError> {
    build_dispatcher(
        blueprint,
        &FilterRegistry::builtin(),
        &HandlerRegistry::builtin(),
    )
}
