//! Error types for client construction and operations.

use crate::availability::TrackerError;
use crate::config::ConfigError;
use crate::dispatch::DispatchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Host availability tracking failed: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// More than one host needs a background prober, which needs a runtime.
    #[error("A running tokio runtime is required when more than one host is configured")]
    NoRuntime,

    #[error("Only can receive max to {max} items in one {operation} request, got {actual}")]
    TooManyItems {
        operation: &'static str,
        max: usize,
        actual: usize,
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
