//! # OutcomeReporter: success/failure counters.
//!
//! Two independent, unlabeled, monotonically increasing counters. Workers of one cycle
//! increment them in parallel; each counter is a single [`AtomicU64`], so no lock is
//! held by the dispatcher or the guard.
//!
//! ## Rules
//! - Increment is the only mutation (no decrement, no reset).
//! - One increment per completed invocation; faulted invocations record nothing.
//! - Counter names are `<prefix>_processing_success` and `<prefix>_processing_failed`.
//!
//! ## Exporting
//! The reporter is owned by the host and passed into components as `Arc<OutcomeReporter>`.
//! A metrics backend polls [`OutcomeReporter::counters`] and publishes the values
//! under their names.
//!
//! ```rust
//! use std::sync::Arc;
//! use cyclevisor::OutcomeReporter;
//!
//! let reporter = Arc::new(OutcomeReporter::new("daemon"));
//! reporter.record_success();
//! for (name, value) in reporter.counters() {
//!     println!("{name} {value}");
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time values of both counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutcomeSnapshot {
    /// Invocations whose handler returned `Ok(())`.
    pub success: u64,
    /// Invocations whose handler returned a business error.
    pub failed: u64,
}

/// Named success/failure counters safe under concurrent increment.
#[derive(Debug)]
pub struct OutcomeReporter {
    success_name: String,
    failed_name: String,
    success: AtomicU64,
    failed: AtomicU64,
}

impl OutcomeReporter {
    /// Creates a reporter whose counters are named after `prefix`.
    pub fn new(prefix: &str) -> Self {
        Self {
            success_name: format!("{prefix}_processing_success"),
            failed_name: format!("{prefix}_processing_failed"),
            success: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Counts one successful invocation.
    #[inline]
    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one invocation that returned a business error.
    #[inline]
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Current success count.
    pub fn success(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    /// Current failure count.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Copies both counters.
    pub fn snapshot(&self) -> OutcomeSnapshot {
        OutcomeSnapshot {
            success: self.success(),
            failed: self.failed(),
        }
    }

    /// Counter names paired with their current values, success first.
    pub fn counters(&self) -> [(&str, u64); 2] {
        [
            (self.success_name.as_str(), self.success()),
            (self.failed_name.as_str(), self.failed()),
        ]
    }
}

impl Default for OutcomeReporter {
    /// Reporter named `daemon_processing_success` / `daemon_processing_failed`.
    fn default() -> Self {
        Self::new("daemon")
    }
}
