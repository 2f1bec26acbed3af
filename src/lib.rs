//! # cyclevisor
//!
//! **Cyclevisor** runs a user handler across a small pool of concurrent workers, either
//! once per call ([`OnDemand`]) or once per interval ([`Periodic`]), with a cooperative
//! per-invocation deadline, per-worker panic isolation, and success/failure counters.
//!
//! Both components expose the same [`Lifecycle`] surface so a host supervisor can start,
//! probe, and stop them uniformly.
//!
//! ## Architecture
//! ```text
//! host ──► Lifecycle::run()
//!              │
//!              ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  CycleScheduler (one per run() call)                          │
//! │  - TriggerPolicy::Once          → one trigger, then exhausted │
//! │  - TriggerPolicy::Every(ivl)    → 1-slot queue, overruns drop │
//! └──────────────────────────────┬────────────────────────────────┘
//!                                ▼ per trigger (strictly sequential)
//! ┌───────────────────────────────────────────────────────────────┐
//! │  dispatch(cycle): JoinSet of workers 1..=N, join barrier      │
//! └──────┬──────────────────┬──────────────────┬──────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌──────────┐       ┌──────────┐       ┌──────────┐
//!   │  guard   │       │  guard   │       │  guard   │   fresh deadline token,
//!   │ worker 1 │       │ worker 2 │  ...  │ worker N │   watcher task (logs only),
//!   └────┬─────┘       └────┬─────┘       └────┬─────┘   catch_unwind boundary
//!        ▼                  ▼                  ▼
//!    handler(Request{ id, deadline context })
//!        │
//!        └──► Ok → success counter | Err → failure counter | panic → logged only
//! ```
//!
//! ## Rules
//! - `run()` fails only when no handler is registered; all other failures are contained
//!   at the worker and visible through `tracing` logs and [`OutcomeReporter`].
//! - Deadlines are advisory: handlers observe [`Request::is_cancelled`] /
//!   [`Request::cancelled`]; nothing is aborted.
//! - Configured worker counts resolve literally: nonzero → 1, zero → 0
//!   (see [`Config::resolve`]).
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                     |
//! |-------------------|-----------------------------------------------------------|----------------------------------------|
//! | **Components**    | Single-shot and interval-driven execution.                | [`OnDemand`], [`Periodic`]             |
//! | **Lifecycle**     | Uniform host surface and introspection.                   | [`Lifecycle`], [`Introspect`]          |
//! | **Handlers**      | Define work as closures or trait objects.                 | [`Handler`], [`HandlerFn`], [`Request`]|
//! | **Metrics**       | Lock-free success/failure counters.                       | [`OutcomeReporter`]                    |
//! | **Errors**        | Typed setup and handler errors.                           | [`RuntimeError`], [`HandlerError`]     |
//! | **Configuration** | Host-supplied settings with defaults applied at setup.    | [`Config`], [`Settings`]               |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use cyclevisor::{
//!     Config, HandlerError, HandlerFn, Lifecycle, OnDemand, OutcomeReporter, Request,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let reporter = std::sync::Arc::new(OutcomeReporter::new("cron"));
//!     let cfg = Config::new(Duration::from_secs(1), Duration::ZERO, 1);
//!
//!     let job = OnDemand::setup(&cfg)
//!         .routing(HandlerFn::arc(|req: Request| async move {
//!             if req.is_cancelled() {
//!                 return Err(HandlerError::Canceled);
//!             }
//!             Ok(())
//!         }))
//!         .with_reporter(reporter.clone());
//!
//!     job.run().await?;
//!     assert_eq!(reporter.success(), 1);
//!     Ok(())
//! }
//! ```
mod components;
mod config;
mod core;
mod error;
mod handlers;
mod metrics;

// ---- Public re-exports ----

pub use components::{Details, Introspect, Lifecycle, OnDemand, Periodic};
pub use config::{Config, DEFAULT_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_WORKERS, Settings};
pub use error::{HandlerError, RuntimeError};
pub use handlers::{BoxHandlerFuture, Handler, HandlerFn, HandlerRef, Request};
pub use metrics::{OutcomeReporter, OutcomeSnapshot};
