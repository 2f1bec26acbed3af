//! # Lifecycle surface.
//!
//! Both components implement [`Lifecycle`], so a host can hold them as
//! `Arc<dyn Lifecycle>` and drive them the same way:
//!
//! ```text
//! host ──► identify()          label for logs ("<kind> id: <uuid>")
//!      ──► liveness_probe()    always Ok
//!      ──► run()               blocks until the trigger source is exhausted
//!      ──► shutdown()          stops trigger generation (never in-flight work)
//!      ──► wait_hint()         budget for the host's shutdown grace period
//! ```

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{config::Settings, error::RuntimeError};

/// Operations a host supervisor uses to start, monitor, and stop a component.
#[async_trait]
pub trait Lifecycle: Send + Sync + 'static {
    /// Human-readable label; a fresh unique token is generated on every call.
    fn identify(&self) -> String;

    /// Liveness hook. Not wired to internal health: always healthy.
    async fn liveness_probe(&self, _ctx: &CancellationToken) -> Result<(), RuntimeError> {
        Ok(())
    }

    /// Runs the component.
    ///
    /// Fails with [`RuntimeError::HandlerNotConfigured`] before any worker starts if no
    /// handler was registered. Everything that happens inside cycles is reported through
    /// logs and counters only.
    async fn run(&self) -> Result<(), RuntimeError>;

    /// Stops generating new cycles. Does not cancel or wait for a cycle in flight.
    async fn shutdown(&self) -> Result<(), RuntimeError>;

    /// The configured per-invocation timeout.
    fn wait_hint(&self) -> Duration;
}

/// Introspection snapshot: effective timeout, interval, and worker count.
///
/// Serializes with durations in milliseconds:
/// `{ "timeout": 50, "interval": 20, "workers": 1 }`.
pub type Details = Settings;

/// Registration and diagnostics surface.
pub trait Introspect {
    /// Stable key identifying this component to the host.
    fn key(&self) -> &str;

    /// Snapshot of the effective settings.
    fn details(&self) -> Details;
}
