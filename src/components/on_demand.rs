//! # OnDemand: single-shot component.
//!
//! Every `run()` fires exactly one cycle and returns once all its workers are done.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use cyclevisor::{Config, HandlerFn, Lifecycle, OnDemand, Request};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::new(Duration::from_millis(50), Duration::ZERO, 3);
//!     let job = OnDemand::setup(&cfg).routing(HandlerFn::arc(|req: Request| async move {
//!         println!("worker {} running", req.id());
//!         Ok(())
//!     }));
//!
//!     job.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Notes
//! - No counters are kept unless a reporter is attached with [`OnDemand::with_reporter`].
//! - [`Lifecycle::shutdown`] is a no-op: there is nothing persistent to release.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::{
    components::Lifecycle,
    config::{Config, Settings},
    core::{CycleParams, CycleScheduler, TriggerPolicy},
    error::RuntimeError,
    handlers::HandlerRef,
    metrics::OutcomeReporter,
};

const COMPONENT: &str = "cron";

/// Runs one cycle of the handler per `run()` call.
pub struct OnDemand {
    settings: Settings,
    handler: Option<HandlerRef>,
    reporter: Option<Arc<OutcomeReporter>>,
}

impl OnDemand {
    /// Resolves `cfg` and creates a component without a handler.
    pub fn setup(cfg: &Config) -> Self {
        Self {
            settings: cfg.resolve(),
            handler: None,
            reporter: None,
        }
    }

    /// Registers (or replaces) the handler.
    #[must_use]
    pub fn routing(mut self, handler: HandlerRef) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Attaches outcome counters.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<OutcomeReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Effective settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Attached outcome counters, if any.
    pub fn reporter(&self) -> Option<&Arc<OutcomeReporter>> {
        self.reporter.as_ref()
    }
}

#[async_trait]
impl Lifecycle for OnDemand {
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

        info!(component = COMPONENT, workers = self.settings.workers(), "starting cron");
        let params = CycleParams {
            component: COMPONENT,
            settings: self.settings,
            handler,
            reporter: self.reporter.clone(),
        };
        CycleScheduler::new(params, TriggerPolicy::Once)
            .run(CancellationToken::new())
            .await;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        Ok(())
    }

    fn wait_hint(&self) -> Duration {
        self.settings.timeout()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        error::HandlerError,
        handlers::{HandlerFn, Request},
        metrics::OutcomeSnapshot,
    };

    fn counting_handler(calls: &Arc<AtomicUsize>) -> HandlerRef {
        let calls = Arc::clone(calls);
        HandlerFn::arc(move |_req: Request| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
    }

    #[tokio::test]
    async fn test_run_without_handler_fails_fast() {
        let reporter = Arc::new(OutcomeReporter::default());
        let job = OnDemand::setup(&Config::new(Duration::ZERO, Duration::ZERO, 3))
            .with_reporter(Arc::clone(&reporter));

        assert_eq!(
            job.run().await,
            Err(RuntimeError::HandlerNotConfigured { component: "cron" })
        );
        assert_eq!(reporter.snapshot(), OutcomeSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_three_workers_runs_once() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = Arc::new(OutcomeReporter::new("cron"));
        let job = OnDemand::setup(&Config::new(Duration::from_millis(50), Duration::ZERO, 3))
            .routing(HandlerFn::arc(move |req: Request| {
                let sink = Arc::clone(&sink);
                async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    sink.lock().unwrap().push(req.id());
                    Ok(())
                }
            }))
            .with_reporter(Arc::clone(&reporter));

        assert_eq!(job.run().await, Ok(()));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(
            reporter.snapshot(),
            OutcomeSnapshot {
                success: 1,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_zero_workers_never_calls_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let job = OnDemand::setup(&Config::default()).routing(counting_handler(&calls));

        assert_eq!(job.run().await, Ok(()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_each_run_is_one_cycle() {
        let calls = Arc::new(AtomicUsize::new(0));
        let job = OnDemand::setup(&Config::new(Duration::ZERO, Duration::ZERO, 1))
            .routing(counting_handler(&calls));

        job.run().await.unwrap();
        job.run().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_and_faults_do_not_surface() {
        let job = OnDemand::setup(&Config::new(Duration::ZERO, Duration::ZERO, 1)).routing(
            HandlerFn::arc(|_req: Request| async { Err(HandlerError::fail("bad input")) }),
        );
        assert_eq!(job.run().await, Ok(()));

        let job = job.routing(HandlerFn::arc(|req: Request| async move {
            if req.id() == 1 {
                panic!("unexpected");
            }
            Ok(())
        }));
        assert_eq!(job.run().await, Ok(()));
        assert!(job.reporter().is_none());
    }

    #[tokio::test]
    async fn test_lifecycle_surface() {
        let job = OnDemand::setup(&Config::default());

        let a = job.identify();
        let b = job.identify();
        assert!(a.starts_with("cron id: "));
        assert_ne!(a, b);
        assert_eq!(job.liveness_probe(&CancellationToken::new()).await, Ok(()));
        assert_eq!(job.shutdown().await, Ok(()));
        assert_eq!(job.wait_hint(), Duration::from_secs(10));
    }
}
