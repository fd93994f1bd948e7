//! Dispatch metrics collection
//!
//! Records routing outcomes to the `metrics` facade and aggregates them in
//! memory for end-of-run summaries.

use metrics::{counter, histogram};
use std::collections::BTreeMap;

/// Final state of a single dispatch call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Accepted and delivered to every handler
    Delivered,
    /// Rejected by a filter
    Rejected,
    /// A filter could not evaluate the message
    FilterFailed,
    /// Accepted, but at least one handler failed
    HandlerFailed,
}

impl DispatchOutcome {
    /// Label value used for the `outcome` metric dimension
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchOutcome::Delivered => "delivered",
            DispatchOutcome::Rejected => "rejected",
            DispatchOutcome::FilterFailed => "filter_failed",
            DispatchOutcome::HandlerFailed => "handler_failed",
        }
    }
}

/// Record the outcome of one dispatch call
pub fn record_dispatch_outcome(outcome: DispatchOutcome) {
    counter!("logroute_messages_total", "outcome" => outcome.as_str()).increment(1);
}

/// Record a failed emit for a handler
pub fn record_handler_failure(handler: &str) {
    counter!(
        "logroute_handler_failures_total",
        "handler" => handler.to_string()
    )
    .increment(1);
}

/// Record how long one dispatch call took
pub fn record_dispatch_latency_us(latency_us: f64) {
    histogram!("logroute_dispatch_latency_us").record(latency_us);
}

/// Dispatch metrics aggregator
///
/// Aggregates in memory, for statistics and summary output.
#[derive(Debug, Clone, Default)]
pub struct DispatchStatsAggregator {
    pub delivered: u64,
    pub rejected: u64,
    pub filter_failed: u64,
    pub handler_failed: u64,
    /// Failure count per handler name
    pub handler_failures: BTreeMap<String, u64>,
    /// Dispatch latency in microseconds
    pub latency_us: RunningStats,
}

impl DispatchStatsAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one dispatch, forwarding to the metrics facade as well
    pub fn record(&mut self, outcome: DispatchOutcome, failed_handlers: &[&str], latency_us: f64) {
        match outcome {
            DispatchOutcome::Delivered => self.delivered += 1,
            DispatchOutcome::Rejected => self.rejected += 1,
            DispatchOutcome::FilterFailed => self.filter_failed += 1,
            DispatchOutcome::HandlerFailed => self.handler_failed += 1,
        }
        for handler in failed_handlers {
            *self.handler_failures.entry(handler.to_string()).or_insert(0) += 1;
            record_handler_failure(handler);
        }
        self.latency_us.push(latency_us);

        record_dispatch_outcome(outcome);
        record_dispatch_latency_us(latency_us);
    }

    /// Total dispatch calls recorded
    pub fn total(&self) -> u64 {
        self.delivered + self.rejected + self.filter_failed + self.handler_failed
    }

    /// Compute summary
    pub fn summary(&self) -> DispatchSummary {
        let total = self.total();
        let accepted = self.delivered + self.handler_failed;
        DispatchSummary {
            total,
            accepted,
            rejected: self.rejected,
            filter_failed: self.filter_failed,
            handler_failed: self.handler_failed,
            acceptance_rate: if total > 0 {
                accepted as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            handler_failures: self.handler_failures.clone(),
            min_latency_us: self.latency_us.min(),
            mean_latency_us: self.latency_us.mean(),
            max_latency_us: self.latency_us.max(),
        }
    }
}

/// Summary of a routing run
#[derive(Debug, Clone, Default)]
pub struct DispatchSummary {
    pub total: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub filter_failed: u64,
    pub handler_failed: u64,
    /// Accepted share of all messages (percent)
    pub acceptance_rate: f64,
    pub handler_failures: BTreeMap<String, u64>,
    pub min_latency_us: f64,
    pub mean_latency_us: f64,
    pub max_latency_us: f64,
}

impl std::fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dispatch Summary:")?;
        writeln!(f, "  Messages: {}", self.total)?;
        writeln!(
            f,
            "  Accepted: {} ({:.1}%)",
            self.accepted, self.acceptance_rate
        )?;
        writeln!(f, "  Rejected: {}", self.rejected)?;
        writeln!(f, "  Filter failures: {}", self.filter_failed)?;
        writeln!(f, "  Delivery failures: {}", self.handler_failed)?;
        for (handler, count) in &self.handler_failures {
            writeln!(f, "    {}: {}", handler, count)?;
        }
        write!(
            f,
            "  Latency (us): min={:.1}, mean={:.1}, max={:.1}",
            self.min_latency_us, self.mean_latency_us, self.max_latency_us
        )
    }
}

/// Online min/mean/max
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// Add a sample
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            self.mean += (value - self.mean) / self.count as f64;
        }
    }

    /// Mean, 0 when empty
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
