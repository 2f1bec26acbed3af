//! # Invocation guard: one handler call, fully contained.
//!
//! Executes one invocation for one worker id and reports how it ended.
//!
//! ## Flow
//! ```text
//! fresh token + deadline (now + timeout)
//!   ├─► spawn_watcher(token, deadline)            (advisory, logs only)
//!   ├─► catch_unwind(handler.handle(Request))     (fault boundary)
//!   │       ├─ Ok(())      ──► record_success ──► Succeeded
//!   │       ├─ Err(e)      ──► record_failure ──► Failed(e)
//!   │       └─ panic       ──► log error       ──► Faulted   (no counter)
//!   └─► token.cancel()                            (releases the watcher)
//! ```
//!
//! ## Rules
//! - The deadline starts when the invocation starts, not when the cycle starts.
//! - Each invocation owns its token; no invocation can cancel a sibling.
//! - Counters are touched only if the component was given a reporter.
//! - Nothing escapes: the guard always returns a [`Disposition`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    core::{scheduler::CycleParams, watcher::spawn_watcher},
    error::Disposition,
    handlers::Request,
};

/// Runs one invocation for `worker` and returns its disposition.
///
/// A panic raised while building the handler future or while polling it is caught
/// here and turned into [`Disposition::Faulted`].
pub(crate) async fn run_guarded(params: &CycleParams, worker: usize) -> Disposition {
    let timeout = params.settings.timeout();
    let token = CancellationToken::new();
    let deadline = Instant::now() + timeout;
    let _watcher = spawn_watcher(params.component, worker, token.clone(), deadline, timeout);

    let req = Request::new(worker, token.clone(), deadline);
    let res = match panic::catch_unwind(AssertUnwindSafe(|| params.handler.handle(req))) {
        Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
        Err(payload) => Err(payload),
    };
    token.cancel();

    match res {
        Ok(Ok(())) => {
            if let Some(reporter) = &params.reporter {
                reporter.record_success();
            }
            Disposition::Succeeded
        }
        Ok(Err(e)) => {
            error!(
                component = params.component,
                worker,
                error = %e,
                label = e.as_label(),
                "handler returned error"
            );
            if let Some(reporter) = &params.reporter {
                reporter.record_failure();
            }
            Disposition::Failed(e)
        }
        Err(payload) => {
            let panic = panic_message(payload.as_ref());
            error!(
                component = params.component,
                worker,
                panic = %panic,
                "recovering from panic"
            );
            Disposition::Faulted(panic)
        }
    }
}

/// Renders a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
