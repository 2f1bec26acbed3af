//! # Deadline watcher.
//!
//! One watcher task per invocation. It waits for whichever comes first:
//! - the deadline: cancels the invocation's token and logs a warning,
//! - the token being cancelled (the guard releases it when the handler returns,
//!   or the handler cancels it itself): logs and exits.
//!
//! The watcher never touches the handler future. A handler that ignores its token
//! keeps running after the warning, unsupervised.

use std::time::Duration;

use tokio::{select, task::JoinHandle, time, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::saturating_millis;

/// Spawns the watcher for one invocation.
pub(crate) fn spawn_watcher(
    component: &'static str,
    worker: usize,
    token: CancellationToken,
    deadline: Instant,
    timeout: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        select! {
            biased;
            _ = token.cancelled() => {
                debug!(component, worker, "invocation context cancelled");
            }
            _ = time::sleep_until(deadline) => {
                token.cancel();
                warn!(
                    component,
                    worker,
                    timeout_ms = saturating_millis(timeout),
                    "context deadline exceeded"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cancels_token() {
        let token = CancellationToken::new();
        let timeout = Duration::from_millis(50);
        let handle = spawn_watcher("test", 1, token.clone(), Instant::now() + timeout, timeout);

        time::sleep(Duration::from_millis(49)).await;
        assert!(!token.is_cancelled());

        handle.await.unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_stops_watcher_before_deadline() {
        let token = CancellationToken::new();
        let timeout = Duration::from_secs(10);
        let start = Instant::now();
        let handle = spawn_watcher("test", 1, token.clone(), start + timeout, timeout);

        token.cancel();
        handle.await.unwrap();
        assert!(start.elapsed() < timeout);
    }
}
