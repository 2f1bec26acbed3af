//! # Periodic: interval-driven component.
//!
//! `run()` fires one cycle per elapsed interval until [`Lifecycle::shutdown`] is called.
//!
//! ## Timeline
//! ```text
//! run()  ──┬── interval ──► cycle 1 ──┬── interval ──► cycle 2 ── ...
//!          │                          │
//!       (no cycle at start)      (next tick while a cycle runs is queued;
//!                                 further ticks are dropped)
//!
//! shutdown() ──► trigger source stops ──► in-flight cycle finishes
//!                                     ──► queued trigger (if any) runs
//!                                     ──► run() returns Ok(())
//! ```
//!
//! ## Example
//! ```rust
//! use std::{sync::Arc, time::Duration};
//! use cyclevisor::{Config, HandlerFn, Lifecycle, Periodic, Request};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::new(Duration::from_millis(50), Duration::from_millis(10), 1);
//!     let daemon = Arc::new(
//!         Periodic::setup(&cfg).routing(HandlerFn::arc(|_req: Request| async { Ok(()) })),
//!     );
//!
//!     let runner = tokio::spawn({
//!         let daemon = Arc::clone(&daemon);
//!         async move { daemon.run().await }
//!     });
//!     tokio::time::sleep(Duration::from_millis(35)).await;
//!     daemon.shutdown().await?;
//!     runner.await??;
//!
//!     assert!(daemon.reporter().success() >= 1);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::{
    components::{Details, Introspect, Lifecycle},
    config::{Config, Settings, saturating_millis},
    core::{CycleParams, CycleScheduler, TriggerPolicy},
    error::RuntimeError,
    handlers::HandlerRef,
    metrics::OutcomeReporter,
};

const COMPONENT: &str = "daemon";

/// Runs one cycle of the handler per elapsed interval.
pub struct Periodic {
    key: String,
    settings: Settings,
    handler: Option<HandlerRef>,
    reporter: Arc<OutcomeReporter>,
    stop: CancellationToken,
}

impl Periodic {
    /// Resolves `cfg` and creates a component without a handler.
    ///
    /// The component gets its own `daemon_processing_*` counters; use
    /// [`Periodic::with_reporter`] to share counters owned by the host.
    pub fn setup(cfg: &Config) -> Self {
        Self {
            key: COMPONENT.to_string(),
            settings: cfg.resolve(),
            handler: None,
            reporter: Arc::new(OutcomeReporter::default()),
            stop: CancellationToken::new(),
        }
    }

    /// Registers (or replaces) the handler.
    #[must_use]
    pub fn routing(mut self, handler: HandlerRef) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Replaces the outcome counters.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<OutcomeReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Overrides the registration key (default `daemon`).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Outcome counters updated by every invocation.
    pub fn reporter(&self) -> &Arc<OutcomeReporter> {
        &self.reporter
    }
}

#[async_trait]
impl Lifecycle for Periodic {
    fn identify(&self) -> String {
        format!("{COMPONENT} id: {}", Uuid::new_v4())
    }

    async fn run(&self) -> Result<(), RuntimeError> {
        let handler = self
            .handler
            .clone()
            .ok_or(RuntimeError::HandlerNotConfigured {
                component: COMPONENT,
            })?;

        info!(
            component = COMPONENT,
            key = %self.key,
            interval_ms = saturating_millis(self.settings.interval()),
            workers = self.settings.workers(),
            "starting daemon"
        );
        let params = CycleParams {
            component: COMPONENT,
            settings: self.settings,
            handler,
            reporter: Some(Arc::clone(&self.reporter)),
        };
        CycleScheduler::new(params, TriggerPolicy::Every(self.settings.interval()))
            .run(self.stop.clone())
            .await;

        info!(component = COMPONENT, key = %self.key, "daemon stopped");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.stop.cancel();
        Ok(())
    }

    fn wait_hint(&self) -> Duration {
        self.settings.timeout()
    }
}

impl Introspect for Periodic {
    fn key(&self) -> &str {
        &self.key
    }

    fn details(&self) -> Details {
        self.settings
    }
}
