//! # Dispatcher
//!
//! Message routing module.
//!
//! Responsible for:
//! - Gating each `Message` through an ordered list of filters
//! - Fan-out of accepted messages to handlers in registration order
//! - Building routes from configuration through kind registries

pub mod dispatcher;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod metrics;
pub mod registry;

pub use contracts::{DeliveryPolicy, Message, MessageFilter, MessageHandler};
pub use dispatcher::{
    build_dispatcher, create_dispatcher, Dispatcher, DispatcherBuilder, Verdict,
};
pub use error::{DispatcherError, HandlerFailure};
pub use filters::{RegexFilter, SeverityFilter, TextFilter};
pub use handlers::{
    LogHandler, MemoryHandler, SocketHandler, SocketHandlerConfig, StreamHandler,
    StreamHandlerConfig,
};
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use registry::{FilterRegistry, HandlerRegistry};
