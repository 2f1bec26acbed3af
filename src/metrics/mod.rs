//! # Outcome accounting.
//!
//! - [`OutcomeReporter`] - pair of lock-free monotonic counters (success / failure)
//! - [`OutcomeSnapshot`] - point-in-time copy of both counters

mod outcome;

pub use outcome::{OutcomeReporter, OutcomeSnapshot};
