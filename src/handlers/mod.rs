//! # Handler abstractions.
//!
//! This module provides the user-facing side of an invocation:
//! - [`Handler`] - trait for the function a component runs on every worker
//! - [`HandlerFn`] - closure-backed handler implementation
//! - [`HandlerRef`] - shared reference to a handler (`Arc<dyn Handler>`)
//! - [`Request`] - per-invocation value carrying the worker id and deadline context

mod handler;
mod handler_fn;
mod request;

pub use handler::{BoxHandlerFuture, Handler, HandlerRef};
pub use handler_fn::HandlerFn;
pub use request::Request;
