//! # Per-invocation request.
//!
//! A [`Request`] is created by the invocation guard for exactly one handler call and
//! carries:
//! - the 1-based worker id within the cycle,
//! - a cooperative deadline context ([`CancellationToken`] + deadline instant).
//!
//! The token is fresh per invocation: cancelling it never affects sibling workers.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Input handed to a [`Handler`](crate::Handler) for one invocation.
#[derive(Clone, Debug)]
pub struct Request {
    id: usize,
    ctx: CancellationToken,
    deadline: Instant,
}

impl Request {
    pub(crate) fn new(id: usize, ctx: CancellationToken, deadline: Instant) -> Self {
        Self { id, ctx, deadline }
    }

    /// 1-based worker id within the current cycle.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Deadline context of this invocation.
    #[inline]
    pub fn context(&self) -> &CancellationToken {
        &self.ctx
    }

    /// Instant at which the deadline context is cancelled.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the deadline (zero once it has passed).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// True once the deadline passed or the invocation was released.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.ctx.is_cancelled()
    }

    /// Completes when the deadline context is cancelled.
    pub async fn cancelled(&self) {
        self.ctx.cancelled().await
    }
}
