//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(Request) -> Fut`, producing a fresh future per
//! invocation. Concurrent workers of one cycle call the same closure in parallel, so it
//! is `Fn` (not `FnMut`); shared state goes behind an explicit `Arc<...>`.
//!
//! ## Example
//! ```rust
//! use cyclevisor::{HandlerFn, HandlerRef, Request};
//!
//! let h: HandlerRef = HandlerFn::arc(|req: Request| async move {
//!     if req.is_cancelled() {
//!         return Ok(());
//!     }
//!     // do work for worker `req.id()`...
//!     Ok(())
//! });
//! # let _ = h;
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::handlers::handler::{BoxHandlerFuture, Handler};
use crate::handlers::Request;

/// Closure-backed handler implementation.
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`](crate::HandlerRef).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    fn handle(&self, req: Request) -> BoxHandlerFuture {
        Box::pin((self.f)(req))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use super::*;

    fn request(id: usize) -> Request {
        Request::new(id, CancellationToken::new(), Instant::now())
    }

    #[tokio::test]
    async fn test_each_call_creates_a_fresh_future() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let h = HandlerFn::arc(move |req: Request| {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(req.id(), Ordering::SeqCst);
                Ok(())
            }
        });

        h.handle(request(1)).await.unwrap();
        h.handle(request(2)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_business_error_is_returned() {
        let h = HandlerFn::new(|_req: Request| async { Err(HandlerError::fail("nope")) });
        assert_eq!(
            h.handle(request(1)).await,
            Err(HandlerError::fail("nope"))
        );
    }
}
