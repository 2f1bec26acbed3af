//! # Handler trait.
//!
//! A [`Handler`] produces a **fresh** future for every invocation. The future owns the
//! [`Request`] it was given, so nothing is shared between sibling workers unless the
//! handler explicitly shares it (e.g. through an `Arc` captured by a closure).

use std::{future::Future, pin::Pin, sync::Arc};

use crate::{error::HandlerError, handlers::Request};

/// Boxed future returned by [`Handler::handle`].
pub type BoxHandlerFuture =
    Pin<Box<dyn Future<Output = Result<(), HandlerError>> + Send + 'static>>;

/// Shared handle to a handler.
pub type HandlerRef = Arc<dyn Handler>;

/// # Unit of work executed by every worker of a cycle.
///
/// The deadline carried by the [`Request`] is advisory: the runtime never aborts the
/// returned future. Implementations that care about the timeout should check
/// [`Request::is_cancelled`] or await [`Request::cancelled`].
///
/// # Example
/// ```
/// use cyclevisor::{BoxHandlerFuture, Handler, HandlerError, Request};
///
/// struct Sweep;
///
/// impl Handler for Sweep {
///     fn handle(&self, req: Request) -> BoxHandlerFuture {
///         Box::pin(async move {
///             if req.is_cancelled() {
///                 return Err(HandlerError::Canceled);
///             }
///             // sweep partition `req.id()`...
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Creates the future for one invocation.
    fn handle(&self, req: Request) -> BoxHandlerFuture;
}
