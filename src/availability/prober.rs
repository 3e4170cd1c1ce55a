//! Lightweight health probes against candidate hosts.

use super::config::AvailabilityConfig;
use super::error::ProbeError;
use async_trait::async_trait;
use reqwest::header::HOST;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Result of probing one host once.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub host: String,
    pub success: bool,
    pub latency: Duration,
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    pub fn success(host: impl Into<String>, latency: Duration) -> Self {
        Self {
            host: host.into(),
            success: true,
            latency,
            error: None,
        }
    }

    pub fn failure(host: impl Into<String>, latency: Duration, error: ProbeError) -> Self {
        Self {
            host: host.into(),
            success: false,
            latency,
            error: Some(error),
        }
    }
}

/// Issues a single health check against a host.
///
/// Implementations must not fail: every problem is folded into an
/// unsuccessful [`ProbeOutcome`].
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, host: &str) -> ProbeOutcome;
}

/// Probes `GET {schema}://{host}{ping_path}` over HTTP.
pub struct HttpProber {
    schema: String,
    ping_path: String,
    timeout: Duration,
    headers: HashMap<String, String>,
    host_header: Option<String>,
    /// One pooled client per host, built once
    clients: HashMap<String, reqwest::Client>,
}

impl HttpProber {
    pub fn new(
        schema: &str,
        hosts: &[String],
        config: &AvailabilityConfig,
        headers: HashMap<String, String>,
        host_header: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let mut clients = HashMap::with_capacity(hosts.len());
        for host in hosts {
            let client = reqwest::Client::builder()
                .timeout(config.probe_timeout())
                .build()?;
            clients.insert(host.clone(), client);
        }

        Ok(Self {
            schema: schema.to_string(),
            ping_path: config.ping_path.clone(),
            timeout: config.probe_timeout(),
            headers,
            host_header,
            clients,
        })
    }

    /// URL probed for `host`.
    pub fn ping_url(&self, host: &str) -> String {
        format!("{}://{}{}", self.schema, host, self.ping_path)
    }

    fn classify_error(&self, e: reqwest::Error) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Timeout(self.timeout.as_millis() as u64)
        } else if e.is_connect() {
            ProbeError::ConnectionFailed(e.to_string())
        } else {
            ProbeError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, host: &str) -> ProbeOutcome {
        let start = Instant::now();
        let Some(client) = self.clients.get(host) else {
            return ProbeOutcome::failure(
                host,
                Duration::ZERO,
                ProbeError::Request(format!("unknown host '{}'", host)),
            );
        };

        let mut request = client.get(self.ping_url(host)).timeout(self.timeout);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(host_header) = &self.host_header {
            request = request.header(HOST, host_header.as_str());
        }

        let outcome = match request.send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                ProbeOutcome::success(host, start.elapsed())
            }
            Ok(response) => ProbeOutcome::failure(
                host,
                start.elapsed(),
                ProbeError::HttpStatus(response.status().as_u16()),
            ),
            Err(e) => ProbeOutcome::failure(host, start.elapsed(), self.classify_error(e)),
        };

        let latency_ms = outcome.latency.as_millis() as u64;
        match &outcome.error {
            None => tracing::trace!(host, latency_ms, "ping success"),
            Some(error) => tracing::warn!(host, latency_ms, error = %error, "ping fail"),
        }
        crate::metrics::record_probe(host, outcome.success, outcome.latency);

        outcome
    }
}
