//! # Cycle engine shared by both components.
//!
//! - [`trigger`] decides **when** a cycle fires ([`TriggerPolicy`])
//! - [`scheduler`] consumes triggers and runs cycles strictly one after another
//! - [`dispatcher`] fans a cycle out to N workers and joins them
//! - [`guard`] runs one handler call under a deadline and a fault boundary
//! - [`watcher`] observes one invocation's deadline context

mod dispatcher;
mod guard;
mod scheduler;
mod trigger;
mod watcher;

pub(crate) use scheduler::{CycleParams, CycleScheduler};
pub(crate) use trigger::TriggerPolicy;
