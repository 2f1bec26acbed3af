//! Error types used by the cyclevisor components and handlers.
//!
//! This module defines two error enums and one outcome type:
//!
//! - [`RuntimeError`] — errors raised by a component itself (setup/contract failures).
//! - [`HandlerError`] — business errors returned by a user handler.
//! - `Disposition` — how a single guarded invocation ended (crate-internal).
//!
//! Both error types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

/// # Errors produced by a component.
///
/// These are the only errors that ever leave [`Lifecycle::run`](crate::Lifecycle::run).
/// Everything that happens inside a cycle is contained at the worker boundary.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// `run()` was called before a handler was registered.
    #[error("{component} transport handler is nil")]
    HandlerNotConfigured {
        /// Component kind tag (`cron`, `daemon`).
        component: &'static str,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use cyclevisor::RuntimeError;
    ///
    /// let err = RuntimeError::HandlerNotConfigured { component: "cron" };
    /// assert_eq!(err.as_label(), "runtime_handler_not_configured");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::HandlerNotConfigured { .. } => "runtime_handler_not_configured",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::HandlerNotConfigured { component } => {
                format!("no handler registered for {component}")
            }
        }
    }
}

/// # Business errors returned by a handler.
///
/// Returning any of these counts as a completed (non-faulted) invocation that failed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// Handler-defined failure.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Handler observed its deadline context and gave up.
    #[error("context cancelled")]
    Canceled,
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use cyclevisor::HandlerError;
    ///
    /// assert_eq!(HandlerError::fail("boom").as_label(), "handler_failed");
    /// assert_eq!(HandlerError::Canceled.as_label(), "handler_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
            HandlerError::Canceled => "handler_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
            HandlerError::Canceled => "context cancelled".to_string(),
        }
    }
}

/// How one guarded invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Handler returned `Ok(())`.
    Succeeded,
    /// Handler returned a business error.
    Failed(HandlerError),
    /// Handler panicked; the payload is rendered as text.
    Faulted(String),
}

impl Disposition {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub(crate) fn as_label(&self) -> &'static str {
        match self {
            Disposition::Succeeded => "succeeded",
            Disposition::Failed(_) => "failed",
            Disposition::Faulted(_) => "faulted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_not_configured_message_names_component() {
        let err = RuntimeError::HandlerNotConfigured {
            component: "daemon",
        };
        assert_eq!(err.to_string(), "daemon transport handler is nil");
        assert_eq!(err.as_message(), "no handler registered for daemon");
    }

    #[test]
    fn test_handler_error_display() {
        assert_eq!(
            HandlerError::fail("disk full").to_string(),
            "execution failed: disk full"
        );
        assert_eq!(HandlerError::Canceled.as_message(), "context cancelled");
    }

    #[test]
    fn test_disposition_labels() {
        assert_eq!(Disposition::Succeeded.as_label(), "succeeded");
        assert_eq!(
            Disposition::Failed(HandlerError::Canceled).as_label(),
            "failed"
        );
        assert_eq!(Disposition::Faulted("x".into()).as_label(), "faulted");
    }
}
