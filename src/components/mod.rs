//! # Host-facing components.
//!
//! - [`Lifecycle`] - uniform surface a host supervisor drives
//! - [`Introspect`] - optional registration/diagnostics surface
//! - [`OnDemand`] - runs one cycle per `run()` call
//! - [`Periodic`] - runs one cycle per elapsed interval until shut down

mod lifecycle;
mod on_demand;
mod periodic;

pub use lifecycle::{Details, Introspect, Lifecycle};
pub use on_demand::OnDemand;
pub use periodic::Periodic;
