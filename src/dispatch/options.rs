//! Per-request options.

use std::collections::HashMap;
use std::time::Duration;

/// Overrides applied to a single request.
///
/// ```
/// use rec_client::dispatch::RequestOptions;
/// use std::time::Duration;
///
/// let options = RequestOptions::new()
///     .timeout(Duration::from_millis(800))
///     .request_id("req-1")
///     .header("X-Debug", "1")
///     .query("stage", "pre");
/// assert_eq!(options.request_id.as_deref(), Some("req-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Falls back to the client default when unset
    pub timeout: Option<Duration>,
    /// Falls back to a random UUID when unset
    pub request_id: Option<String>,
    pub headers: HashMap<String, String>,
    pub queries: HashMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.insert(name.into(), value.into());
        self
    }
}
