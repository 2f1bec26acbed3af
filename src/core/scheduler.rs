//! # Cycle scheduler.
//!
//! Consumes a trigger source and runs one dispatch cycle per trigger.
//!
//! ```text
//! CycleScheduler::run(stop)
//!   triggers = trigger::start(policy, stop)
//!   while let Some(cycle) = triggers.recv() {
//!       dispatch(cycle)          (join barrier: all workers done)
//!   }
//! ```
//!
//! ## Rules
//! - Cycles are **strictly sequential**: cycle K+1 never starts before cycle K's barrier.
//! - `run` returns only when the trigger source is exhausted
//!   (after one cycle for `Once`, after stop + drain for `Every`).
//! - The scheduler holds no per-cycle mutable state; [`CycleParams`] is read-only.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    config::Settings,
    core::{dispatcher::dispatch, trigger, trigger::TriggerPolicy},
    handlers::HandlerRef,
    metrics::OutcomeReporter,
};

/// Read-only inputs shared by every worker of every cycle.
#[derive(Clone)]
pub(crate) struct CycleParams {
    /// Component kind tag used in logs.
    pub component: &'static str,
    /// Effective settings (timeout, interval, workers).
    pub settings: Settings,
    /// Handler invoked by each worker.
    pub handler: HandlerRef,
    /// Optional outcome counters.
    pub reporter: Option<Arc<OutcomeReporter>>,
}

/// Runs cycles according to a [`TriggerPolicy`].
pub(crate) struct CycleScheduler {
    params: Arc<CycleParams>,
    policy: TriggerPolicy,
}

impl CycleScheduler {
    pub(crate) fn new(params: CycleParams, policy: TriggerPolicy) -> Self {
        Self {
            params: Arc::new(params),
            policy,
        }
    }

    /// Runs until the trigger source is exhausted; returns the number of cycles run.
    pub(crate) async fn run(&self, stop: CancellationToken) -> u64 {
        let mut triggers = trigger::start(self.policy, self.params.component, stop);
        let mut cycles = 0;

        while let Some(cycle) = triggers.recv().await {
            dispatch(&self.params, cycle).await;
            cycles += 1;
        }

        debug!(component = self.params.component, cycles, "scheduler finished");
        cycles
    }
}
