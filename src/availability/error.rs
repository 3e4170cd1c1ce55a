//! Error types for host availability tracking.

use crate::config::ConfigError;
use thiserror::Error;

/// Why a single probe counted as a failure.
///
/// Probe errors are recorded in the host's window and logged; they never
/// reach the application.
#[derive(Debug, Clone, Error)]
pub enum ProbeError {
    /// Probe exceeded its deadline
    #[error("probe timeout after {0}ms")]
    Timeout(u64),

    /// Connection could not be established
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Host answered with something other than 200
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// Any other request failure
    #[error("request failed: {0}")]
    Request(String),
}

/// Errors raised while constructing or starting a tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("host availability tracker requires at least one host")]
    NoHosts,

    /// The same host is listed twice; each host owns exactly one window
    #[error("host '{0}' is configured more than once")]
    DuplicateHost(String),

    #[error("invalid availability settings: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("host availability tracker is already running")]
    AlreadyStarted,
}
