//! Dispatch metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Messages accepted by every filter
    accepted: AtomicU64,
    /// Messages rejected by some filter
    rejected: AtomicU64,
    /// Messages whose filter evaluation failed
    filter_errors: AtomicU64,
    /// Successful handler emits
    delivered: AtomicU64,
    /// Failed handler emits
    handler_failures: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get accepted count
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Increment accepted count
    pub fn inc_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get rejected count
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Increment rejected count
    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get filter error count
    pub fn filter_errors(&self) -> u64 {
        self.filter_errors.load(Ordering::Relaxed)
    }

    /// Increment filter error count
    pub fn inc_filter_errors(&self) {
        self.filter_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get delivered count
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Increment delivered count
    pub fn inc_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Get handler failure count
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    /// Increment handler failure count
    pub fn inc_handler_failures(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            accepted: self.accepted(),
            rejected: self.rejected(),
            filter_errors: self.filter_errors(),
            delivered: self.delivered(),
            handler_failures: self.handler_failures(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
    pub filter_errors: u64,
    pub delivered: u64,
    pub handler_failures: u64,
}

impl MetricsSnapshot {
    /// Total messages submitted for dispatch
    pub fn submitted(&self) -> u64 {
        self.accepted + self.rejected + self.filter_errors
    }
}
