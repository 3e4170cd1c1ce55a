//! Shared test utilities for rec-client integration tests.
//!
//! Provides config builders, wiremock helpers and recording test doubles.

#![allow(dead_code)]

use rec_client::availability::AvailabilityConfig;
use rec_client::config::{ClientConfig, Region};
use rec_client::url::UrlRefresher;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Well-Known Test Constants
// =============================================================================

pub const TENANT: &str = "retail_demo";
pub const TENANT_ID: &str = "012345";
pub const TOKEN: &str = "test-token";
pub const PING_PATH: &str = "/predict/api/ping";

/// UUID v4 string length: "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
pub const UUID_V4_STRING_LEN: usize = 36;

// =============================================================================
// Config Builders
// =============================================================================

/// Availability settings tuned for tests: fast ticks, small window.
pub fn fast_availability() -> AvailabilityConfig {
    AvailabilityConfig {
        probe_interval_ms: 20,
        probe_timeout_ms: 300,
        window_size: 10,
        ..Default::default()
    }
}

/// Valid config pointing at `hosts` over plain HTTP.
pub fn make_config(hosts: Vec<String>) -> ClientConfig {
    ClientConfig {
        tenant: TENANT.to_string(),
        tenant_id: TENANT_ID.to_string(),
        token: TOKEN.to_string(),
        schema: "http".to_string(),
        region: Region::Sg,
        hosts,
        availability: fast_availability(),
        ..Default::default()
    }
}

// =============================================================================
// Mock Servers
// =============================================================================

/// `host:port` of a mock server, as used in URLs.
pub fn host_of(server: &MockServer) -> String {
    server.address().to_string()
}

/// Mock server answering the ping endpoint with `status`.
pub async fn ping_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Address nothing listens on.
pub fn unreachable_host() -> String {
    "127.0.0.1:1".to_string()
}

/// Poll `condition` until it holds or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

// =============================================================================
// Test Doubles
// =============================================================================

/// Records every host it is refreshed with.
#[derive(Default)]
pub struct RecordingRefresher {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingRefresher {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl UrlRefresher for RecordingRefresher {
    fn refresh(&self, host: &str) {
        self.calls.lock().unwrap().push(host.to_string());
    }
}
