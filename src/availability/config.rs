//! Configuration for host availability tracking.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the background host prober.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    /// Health check path appended to `{schema}://{host}`
    pub ping_path: String,
    /// Timeout for each probe request
    pub probe_timeout_ms: u64,
    /// Milliseconds between probe cycles
    pub probe_interval_ms: u64,
    /// Hosts at or above this failure rate are considered unavailable
    pub failure_rate_threshold: f64,
    /// Number of recent probe outcomes kept per host
    pub window_size: usize,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            ping_path: "/predict/api/ping".to_string(),
            probe_timeout_ms: 200,
            probe_interval_ms: 1000,
            failure_rate_threshold: 0.1,
            window_size: 60,
        }
    }
}

impl AvailabilityConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    /// Reject settings the probe loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::invalid(
                "availability.window_size",
                "window size must be at least 1",
            ));
        }
        // Written negated so NaN fails too.
        if !(self.failure_rate_threshold > 0.0 && self.failure_rate_threshold <= 1.0) {
            return Err(ConfigError::invalid(
                "availability.failure_rate_threshold",
                format!("threshold must be in (0, 1], got {}", self.failure_rate_threshold),
            ));
        }
        if self.probe_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "availability.probe_interval_ms",
                "interval must be non-zero",
            ));
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "availability.probe_timeout_ms",
                "timeout must be non-zero",
            ));
        }
        if !self.ping_path.starts_with('/') {
            return Err(ConfigError::invalid(
                "availability.ping_path",
                "path must start with '/'",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(config: &AvailabilityConfig) -> String {
        match config.validate() {
            Err(ConfigError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(AvailabilityConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        for threshold in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let config = AvailabilityConfig {
                failure_rate_threshold: threshold,
                ..Default::default()
            };
            assert_eq!(rejected_field(&config), "availability.failure_rate_threshold");
        }

        let config = AvailabilityConfig {
            failure_rate_threshold: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_durations_rejected() {
        let config = AvailabilityConfig {
            probe_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(rejected_field(&config), "availability.probe_timeout_ms");

        let config = AvailabilityConfig {
            probe_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(rejected_field(&config), "availability.probe_interval_ms");
    }

    #[test]
    fn test_window_and_path_rejected() {
        let config = AvailabilityConfig {
            window_size: 0,
            ..Default::default()
        };
        assert_eq!(rejected_field(&config), "availability.window_size");

        let config = AvailabilityConfig {
            ping_path: "ping".to_string(),
            ..Default::default()
        };
        assert_eq!(rejected_field(&config), "availability.ping_path");
    }
}
