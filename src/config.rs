//! # Component configuration.
//!
//! Provides [`Config`], the host-supplied settings, and [`Settings`], the immutable
//! view a component actually runs with.
//!
//! [`Config::resolve`] is applied exactly once, at component setup:
//! - `timeout = 0s` → [`DEFAULT_TIMEOUT`]
//! - `interval = 0s` → [`DEFAULT_INTERVAL`] (only the periodic component reads it)
//! - `workers > 0` → [`DEFAULT_WORKERS`]; `workers = 0` stays `0`
//!
//! The worker rule is intentionally literal: any configured count collapses to one
//! worker, and zero produces a cycle that never calls the handler.
//!
//! ## Wire format
//! Durations are integer milliseconds; missing fields are zero (and then resolved):
//! ```text
//! { "timeout": 50, "interval": 20, "workers": 3 }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-invocation deadline applied when `timeout` is zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trigger interval applied when `interval` is zero.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Effective worker count for any nonzero configured value.
pub const DEFAULT_WORKERS: usize = 1;

/// Host-supplied configuration, before defaults are applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-invocation deadline (`0` = use [`DEFAULT_TIMEOUT`]).
    #[serde(with = "millis")]
    pub timeout: Duration,

    /// Time between cycle triggers, periodic component only (`0` = use [`DEFAULT_INTERVAL`]).
    #[serde(with = "millis")]
    pub interval: Duration,

    /// Workers per cycle (see module docs for the resolution rule).
    pub workers: usize,
}

impl Config {
    /// Creates a configuration from raw values.
    pub fn new(timeout: Duration, interval: Duration, workers: usize) -> Self {
        Self {
            timeout,
            interval,
            workers,
        }
    }

    /// Applies defaults and returns the effective, immutable settings.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use cyclevisor::Config;
    ///
    /// let s = Config::new(Duration::ZERO, Duration::from_millis(20), 3).resolve();
    /// assert_eq!(s.timeout(), Duration::from_secs(10));
    /// assert_eq!(s.interval(), Duration::from_millis(20));
    /// assert_eq!(s.workers(), 1);
    /// ```
    pub fn resolve(&self) -> Settings {
        let timeout = if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        };
        let interval = if self.interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            self.interval
        };
        let workers = if self.workers != 0 {
            DEFAULT_WORKERS
        } else {
            0
        };
        Settings {
            timeout,
            interval,
            workers,
        }
    }
}

/// Effective settings a component runs with; also the introspection snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    #[serde(with = "millis")]
    timeout: Duration,
    #[serde(with = "millis")]
    interval: Duration,
    workers: usize,
}

impl Settings {
    /// Per-invocation deadline (always `> 0`).
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time between cycle triggers (always `> 0`).
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Workers started per cycle (`0` or `1`).
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Overrides the worker count, bypassing resolution.
    #[cfg(test)]
    pub(crate) fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
#[inline]
pub(crate) fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(super::saturating_millis(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_and_interval_use_defaults() {
        let s = Config::default().resolve();
        assert_eq!(s.timeout(), Duration::from_secs(10));
        assert_eq!(s.interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_durations_are_kept() {
        let s = Config::new(Duration::from_millis(50), Duration::from_millis(20), 0).resolve();
        assert_eq!(s.timeout(), Duration::from_millis(50));
        assert_eq!(s.interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_zero_workers_stays_zero() {
        let s = Config::default().resolve();
        assert_eq!(s.workers(), 0);
    }

    #[test]
    fn test_nonzero_workers_collapse_to_one() {
        for configured in [1, 3, 64, usize::MAX] {
            let cfg = Config {
                workers: configured,
                ..Config::default()
            };
            assert_eq!(cfg.resolve().workers(), 1, "configured={configured}");
        }
    }

    #[test]
    fn test_deserialize_millis_and_missing_fields() {
        let cfg: Config = serde_json::from_str(r#"{ "timeout": 50, "workers": 3 }"#).unwrap();
        assert_eq!(cfg.timeout, Duration::from_millis(50));
        assert_eq!(cfg.interval, Duration::ZERO);
        assert_eq!(cfg.workers, 3);
    }

    #[test]
    fn test_saturating_millis() {
        assert_eq!(saturating_millis(Duration::from_millis(250)), 250);
        assert_eq!(saturating_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_huge_durations_serialize_without_truncation() {
        let s = Config::new(Duration::MAX, Duration::from_millis(u64::MAX), 1).resolve();
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["timeout"], serde_json::json!(u64::MAX));
        assert_eq!(json["interval"], serde_json::json!(u64::MAX));
    }

    #[test]
    fn test_settings_serialize_as_millis() {
        let s = Config::new(Duration::from_millis(50), Duration::ZERO, 2).resolve();
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "timeout": 50, "interval": 10000, "workers": 1 })
        );
    }
}
