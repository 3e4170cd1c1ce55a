//! Request dispatch.
//!
//! [`HttpCaller`] performs one signed, gzip-compressed POST per call and
//! decodes the response. It is shared by every operation of a client and
//! by the availability tracker, which asks it to rebind its connection pool
//! when the active host changes behind a fixed `Host` header.

mod auth;
mod codec;
mod error;
mod options;

pub use auth::{calc_signature, AuthHeaders};
pub use codec::{gunzip, gzip};
pub use error::DispatchError;
pub use options::RequestOptions;

use crate::availability::ConnectionRebinder;
use crate::client::Context;
use crate::metrics::{self, RequestStatus};
use arc_swap::ArcSwap;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE, HOST};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const REQUEST_ID_HEADER: &str = "Request-Id";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Sends signed requests to the service.
pub struct HttpCaller {
    tenant_id: String,
    token: String,
    headers: HashMap<String, String>,
    host_header: Option<String>,
    default_timeout: Duration,
    log_response_bodies: bool,
    client: ArcSwap<reqwest::Client>,
}

impl HttpCaller {
    pub fn new(context: &Context) -> Result<Self, reqwest::Error> {
        Ok(Self {
            tenant_id: context.tenant_id().to_string(),
            token: context.token().to_string(),
            headers: context.headers().clone(),
            host_header: context.host_header().map(str::to_string),
            default_timeout: context.timeout(),
            log_response_bodies: context.log_response_bodies(),
            client: ArcSwap::from_pointee(build_client()?),
        })
    }

    /// POST `request` as JSON and decode a JSON response.
    pub async fn do_json_request<Req, Resp>(
        &self,
        url: &str,
        request: &Req,
        options: &RequestOptions,
    ) -> Result<Resp, DispatchError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_vec(request).map_err(DispatchError::Serialize)?;
        let payload = self.execute(url, &body, JSON_CONTENT_TYPE, options).await?;
        serde_json::from_slice(&payload).map_err(DispatchError::Deserialize)
    }

    /// POST pre-encoded bytes and return the (decompressed) response body.
    pub async fn do_raw_request(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
        options: &RequestOptions,
    ) -> Result<Vec<u8>, DispatchError> {
        self.execute(url, body, content_type, options).await
    }

    async fn execute(
        &self,
        url: &str,
        body: &[u8],
        content_type: &str,
        options: &RequestOptions,
    ) -> Result<Vec<u8>, DispatchError> {
        let compressed = gzip(body).map_err(DispatchError::Compress)?;
        let request_id = options
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let auth = AuthHeaders::sign(&self.tenant_id, &self.token, &compressed);

        let client = self.client.load_full();
        let mut request = client
            .post(url)
            .timeout(timeout)
            .header(CONTENT_ENCODING, "gzip")
            .header(ACCEPT_ENCODING, "gzip")
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, content_type)
            .header(REQUEST_ID_HEADER, request_id.as_str());
        for (name, value) in auth.pairs() {
            request = request.header(name, value);
        }
        for (name, value) in self.headers.iter().chain(options.headers.iter()) {
            request = request.header(name.as_str(), value.as_str());
        }
        if !options.queries.is_empty() {
            request = request.query(&options.queries);
        }
        if let Some(host_header) = &self.host_header {
            request = request.header(HOST, host_header.as_str());
        }

        let start = Instant::now();
        let response = match request.body(compressed).send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_error(url, &request_id, timeout, start, e)),
        };

        let status = response.status();
        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .map(|v| v.as_bytes().eq_ignore_ascii_case(b"gzip"))
            .unwrap_or(false);
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.transport_error(url, &request_id, timeout, start, e)),
        };

        if status != StatusCode::OK {
            let raw = if gzipped {
                gunzip(&bytes).unwrap_or_else(|_| bytes.to_vec())
            } else {
                bytes.to_vec()
            };
            let body = String::from_utf8_lossy(&raw).into_owned();
            tracing::error!(
                url,
                request_id = %request_id,
                status = status.as_u16(),
                body = %body,
                "request rejected by service"
            );
            metrics::record_request(url, start.elapsed(), &RequestStatus::Status(status.as_u16()));
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = if gzipped {
            gunzip(&bytes).map_err(DispatchError::Decompress)?
        } else {
            bytes.to_vec()
        };

        let elapsed = start.elapsed();
        metrics::record_request(url, elapsed, &RequestStatus::Success);
        tracing::debug!(
            url,
            request_id = %request_id,
            latency_ms = elapsed.as_millis() as u64,
            "request finished"
        );
        if self.log_response_bodies {
            tracing::debug!(
                url,
                request_id = %request_id,
                body = %String::from_utf8_lossy(&payload),
                "response body"
            );
        }

        Ok(payload)
    }

    fn transport_error(
        &self,
        url: &str,
        request_id: &str,
        timeout: Duration,
        start: Instant,
        e: reqwest::Error,
    ) -> DispatchError {
        let tag = exception_tag(&e);
        metrics::record_request(url, start.elapsed(), &RequestStatus::Exception(tag));
        tracing::error!(
            url,
            request_id,
            latency_ms = start.elapsed().as_millis() as u64,
            error = %e,
            "request failed"
        );

        if e.is_timeout() {
            DispatchError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }
        } else {
            DispatchError::Network(e.to_string())
        }
    }
}

impl ConnectionRebinder for HttpCaller {
    fn rebind(&self, host: &str) {
        match build_client() {
            Ok(client) => {
                self.client.store(Arc::new(client));
                tracing::info!(host, "rebound request connections");
            }
            Err(e) => tracing::warn!(host, error = %e, "failed to rebuild HTTP client, keeping old pool"),
        }
    }
}

impl std::fmt::Debug for HttpCaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCaller")
            .field("tenant_id", &self.tenant_id)
            .field("host_header", &self.host_header)
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

fn exception_tag(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        if e.is_connect() {
            "connect-timeout"
        } else if e.is_body() || e.is_decode() {
            "read-timeout"
        } else {
            "timeout"
        }
    } else {
        metrics::error_category(&e.to_string())
    }
}
