//! # Observability
//!
//! Tracing initialization plus Prometheus metrics for message routing.
//!
//! ## Features
//!
//! - Tracing initialization (JSON/Pretty/Compact formats)
//! - Prometheus metrics export
//! - Dispatch outcome recording and in-memory aggregation
//!
//! ## Usage
//!
//! ```ignore
//! use observability::{DispatchOutcome, DispatchStatsAggregator, ObservabilityConfig};
//!
//! observability::init_with_config(ObservabilityConfig::default())?;
//!
//! let mut stats = DispatchStatsAggregator::new();
//! stats.record(DispatchOutcome::Delivered, &[], 12.0);
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

// Re-exports
pub use crate::metrics::{
    record_dispatch_latency_us, record_dispatch_outcome, record_handler_failure, DispatchOutcome,
    DispatchStatsAggregator, DispatchSummary, RunningStats,
};

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Prometheus port (None = disabled)
    pub metrics_port: Option<u16>,
    /// Log level directive used when RUST_LOG is unset or ignored
    pub default_log_level: String,
    /// Let RUST_LOG override `default_log_level`
    pub respect_rust_log: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            metrics_port: None,
            default_log_level: "info".to_string(),
            respect_rust_log: true,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

/// Initialize with a custom configuration
///
/// Logs go to stderr so that stream handlers writing to stdout stay clean.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = if config.respect_rust_log {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level))
    } else {
        EnvFilter::new(&config.default_log_level)
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    if let Some(port) = config.metrics_port {
        init_metrics_only(port)?;
    }

    tracing::debug!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "Observability initialized"
    );

    Ok(())
}

/// Initialize Prometheus metrics only (no Tracing)
///
/// For binaries that set up their own tracing subscriber.
pub fn init_metrics_only(port: u16) -> Result<()> {
    let builder = PrometheusBuilder::new();
    builder
        .with_http_listener(([0, 0, 0, 0], port))
        .install()
        .context("Failed to install Prometheus recorder")?;

    tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    Ok(())
}
