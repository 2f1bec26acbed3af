//! # Trigger sources.
//!
//! A trigger source is a receiver of cycle numbers. The scheduler runs one cycle per
//! received value and returns when the source is exhausted.
//!
//! ```text
//! TriggerPolicy::Once
//!   [1] ──► closed                      (one cycle, then exhausted)
//!
//! TriggerPolicy::Every(interval)
//!   producer task:  tick(start + interval), tick(start + 2·interval), ...
//!        │ try_send
//!        ▼
//!   [ slot ] (capacity 1)  ──► scheduler
//!        └─ full → tick dropped (logged at debug)
//!   stop token cancelled → producer exits → slot closes after draining
//! ```
//!
//! ## Rules
//! - The first periodic trigger fires one interval after the source starts.
//! - At most **one** trigger is pending; overruns are dropped, never accumulated.
//! - Stopping never interrupts a running cycle; it only ends trigger generation.

use std::time::Duration;

use tokio::{
    select,
    sync::mpsc::{self, error::TrySendError},
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// When a component fires its cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Exactly one cycle, immediately.
    Once,
    /// One cycle per elapsed interval, until stopped.
    Every(Duration),
}

/// Starts a trigger source for `policy`.
///
/// `stop` only affects [`TriggerPolicy::Every`].
pub(crate) fn start(
    policy: TriggerPolicy,
    component: &'static str,
    stop: CancellationToken,
) -> mpsc::Receiver<u64> {
    let (tx, rx) = mpsc::channel(1);
    match policy {
        TriggerPolicy::Once => {
            // Fresh capacity-1 channel: this send cannot fail.
            tx.try_send(1).ok();
        }
        TriggerPolicy::Every(interval) => {
            tokio::spawn(tick_loop(tx, interval, component, stop));
        }
    }
    rx
}

async fn tick_loop(
    tx: mpsc::Sender<u64>,
    interval: Duration,
    component: &'static str,
    stop: CancellationToken,
) {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycle: u64 = 0;

    loop {
        select! {
            biased;
            _ = stop.cancelled() => break,
            _ = ticker.tick() => {
                cycle += 1;
                match tx.try_send(cycle) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        debug!(component, cycle, "trigger dropped: previous trigger still pending");
                    }
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        }
    }
    debug!(component, "trigger source stopped");
}
