//! # Worker pool dispatcher.
//!
//! Fans one cycle out to `N = settings.workers()` workers and waits for all of them.
//!
//! ```text
//! dispatch(cycle)
//!   ├─► JoinSet::spawn(worker 1) ──► run_guarded(1)
//!   ├─► JoinSet::spawn(worker 2) ──► run_guarded(2)
//!   │        ...
//!   ├─► JoinSet::spawn(worker N) ──► run_guarded(N)
//!   └─► join_next() until empty   (join barrier)
//! ```
//!
//! ## Rules
//! - Workers are spawned with ascending ids `1..=N`; completion order is unspecified.
//! - The barrier waits for every worker whatever its disposition.
//! - `N = 0` returns immediately with an empty report.
//! - A join error (fault outside the guard) is logged and counted as faulted.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::{
    core::{guard::run_guarded, scheduler::CycleParams},
    error::Disposition,
};

/// Per-cycle tally of worker dispositions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CycleReport {
    pub succeeded: usize,
    pub failed: usize,
    pub faulted: usize,
}

impl CycleReport {
    fn record(&mut self, d: &Disposition) {
        match d {
            Disposition::Succeeded => self.succeeded += 1,
            Disposition::Failed(_) => self.failed += 1,
            Disposition::Faulted(_) => self.faulted += 1,
        }
    }

    /// Number of workers that reached the barrier.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.faulted
    }
}

/// Runs one cycle: spawns every worker, then blocks on the join barrier.
pub(crate) async fn dispatch(params: &Arc<CycleParams>, cycle: u64) -> CycleReport {
    let workers = params.settings.workers();
    let mut set = JoinSet::new();

    for worker in 1..=workers {
        let p = Arc::clone(params);
        set.spawn(async move {
            info!(component = p.component, cycle, worker, "start worker");
            let d = run_guarded(&p, worker).await;
            info!(
                component = p.component,
                cycle,
                worker,
                outcome = d.as_label(),
                "end worker"
            );
            d
        });
    }

    let mut report = CycleReport::default();
    while let Some(res) = set.join_next().await {
        match res {
            Ok(d) => report.record(&d),
            Err(e) => {
                error!(component = params.component, cycle, error = %e, "worker aborted");
                report.faulted += 1;
            }
        }
    }

    debug!(
        component = params.component,
        cycle,
        workers = report.total(),
        succeeded = report.succeeded,
        failed = report.failed,
        faulted = report.faulted,
        "cycle complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::sync::Barrier;

    use super::*;
    use crate::{
        config::Config,
        error::HandlerError,
        handlers::{HandlerFn, HandlerRef, Request},
        metrics::OutcomeReporter,
    };

    fn params(handler: HandlerRef, workers: usize) -> (Arc<CycleParams>, Arc<OutcomeReporter>) {
        let reporter = Arc::new(OutcomeReporter::default());
        let p = CycleParams {
            component: "test",
            settings: Config::new(Duration::from_secs(1), Duration::ZERO, 1)
                .resolve()
                .with_workers(workers),
            handler,
            reporter: Some(Arc::clone(&reporter)),
        };
        (Arc::new(p), reporter)
    }

    #[tokio::test]
    async fn test_invokes_each_id_exactly_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let h = HandlerFn::arc(move |req: Request| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(req.id());
                Ok(())
            }
        });
        let (p, reporter) = params(h, 5);

        let report = dispatch(&p, 1).await;

        let mut ids = seen.lock().unwrap().clone();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.succeeded, 5);
        assert_eq!(reporter.success(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_workers_run_concurrently() {
        // Every worker waits for all the others; only passes if they overlap.
        let barrier = Arc::new(Barrier::new(4));
        let b = Arc::clone(&barrier);
        let h = HandlerFn::arc(move |_req: Request| {
            let b = Arc::clone(&b);
            async move {
                b.wait().await;
                Ok(())
            }
        });
        let (p, _) = params(h, 4);

        let report = tokio::time::timeout(Duration::from_secs(5), dispatch(&p, 1))
            .await
            .expect("workers did not overlap");
        assert_eq!(report.succeeded, 4);
    }

    #[tokio::test]
    async fn test_zero_workers_is_a_noop() {
        let h = HandlerFn::arc(|req: Request| async move {
            if req.id() > 0 {
                panic!("must not be called");
            }
            Ok(())
        });
        let (p, reporter) = params(h, 0);

        let report = dispatch(&p, 1).await;
        assert_eq!(report.total(), 0);
        assert_eq!(reporter.success() + reporter.failed(), 0);
    }

    #[tokio::test]
    async fn test_fault_does_not_abort_siblings() {
        let h = HandlerFn::arc(|req: Request| async move {
            match req.id() {
                2 => panic!("worker 2 exploded"),
                3 => Err(HandlerError::fail("worker 3 failed")),
                _ => {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    Ok(())
                }
            }
        });
        let (p, reporter) = params(h, 4);

        let report = dispatch(&p, 1).await;
        assert_eq!(
            report,
            CycleReport {
                succeeded: 2,
                failed: 1,
                faulted: 1
            }
        );
        assert_eq!(reporter.success(), 2);
        assert_eq!(reporter.failed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelling_own_context_leaves_sibling_untouched() {
        let h = HandlerFn::arc(|req: Request| async move {
            if req.id() == 1 {
                req.context().cancel();
                return Err(HandlerError::Canceled);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            if req.is_cancelled() {
                return Err(HandlerError::fail("sibling context was cancelled"));
            }
            Ok(())
        });
        let (p, reporter) = params(h, 2);

        let report = dispatch(&p, 1).await;
        assert_eq!(
            report,
            CycleReport {
                succeeded: 1,
                failed: 1,
                faulted: 0
            }
        );
        assert_eq!(reporter.success(), 1);
        assert_eq!(reporter.failed(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_barrier_waits_for_slowest_worker() {
        let h = HandlerFn::arc(|req: Request| async move {
            tokio::time::sleep(Duration::from_millis(10 * req.id() as u64)).await;
            Ok(())
        });
        let (p, _) = params(h, 3);
        let start = tokio::time::Instant::now();

        dispatch(&p, 1).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
