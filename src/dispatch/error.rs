//! Error types for request dispatch.

use thiserror::Error;

/// Errors that can occur while sending a request to the service.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to compress request body: {0}")]
    Compress(#[source] std::io::Error),

    /// Request exceeded its deadline.
    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with something other than 200.
    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decompress response body: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl DispatchError {
    /// True when the failure happened on the wire rather than in local
    /// encoding or decoding.
    pub fn is_net_error(&self) -> bool {
        matches!(
            self,
            DispatchError::Timeout { .. } | DispatchError::Network(_) | DispatchError::Status { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DispatchError::Timeout { .. })
    }
}
