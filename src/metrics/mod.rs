//! # Client Metrics
//!
//! Emits probe and request metrics through the [`metrics`] facade. Nothing is
//! exported unless the application installs a recorder.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `rec_client_probes_total{host, result}` - Health probes by outcome
//! - `rec_client_host_switches_total{from, to}` - Active host changes
//! - `rec_client_requests_total{url, req_type, status, message}` - API requests
//!
//! **Histograms:**
//! - `rec_client_probe_latency_seconds{host, result}` - Probe round trip
//! - `rec_client_request_duration_seconds{url, req_type}` - API request duration
//!
//! **Gauges:**
//! - `rec_client_host_failure_rate{host}` - Sliding window failure rate

use std::time::Duration;

pub const PROBES_TOTAL: &str = "rec_client_probes_total";
pub const PROBE_LATENCY_SECONDS: &str = "rec_client_probe_latency_seconds";
pub const HOST_FAILURE_RATE: &str = "rec_client_host_failure_rate";
pub const HOST_SWITCHES_TOTAL: &str = "rec_client_host_switches_total";
pub const REQUESTS_TOTAL: &str = "rec_client_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "rec_client_request_duration_seconds";

fn result_label(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Record one probe outcome for `host`.
pub fn record_probe(host: &str, success: bool, latency: Duration) {
    let result = result_label(success);
    metrics::counter!(PROBES_TOTAL, "host" => host.to_string(), "result" => result).increment(1);
    metrics::histogram!(PROBE_LATENCY_SECONDS, "host" => host.to_string(), "result" => result)
        .record(latency.as_secs_f64());
}

pub fn record_failure_rate(host: &str, rate: f64) {
    metrics::gauge!(HOST_FAILURE_RATE, "host" => host.to_string()).set(rate);
}

pub fn record_host_switch(from: &str, to: &str) {
    metrics::counter!(HOST_SWITCHES_TOTAL, "from" => from.to_string(), "to" => to.to_string())
        .increment(1);
}

/// How a dispatched request ended, for labelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    Success,
    /// Server answered with a non-200 status
    Status(u16),
    /// Transport-level failure, with its message category
    Exception(&'static str),
}

/// Record one API request against `url`.
pub fn record_request(url: &str, elapsed: Duration, status: &RequestStatus) {
    let url_label = url_tag(url);
    let req_type = request_type(url);
    let (status_label, message) = match status {
        RequestStatus::Success => ("200".to_string(), "ok"),
        RequestStatus::Status(code) => (code.to_string(), "http-status"),
        RequestStatus::Exception(message) => ("exception".to_string(), *message),
    };

    metrics::histogram!(
        REQUEST_DURATION_SECONDS,
        "url" => url_label.clone(),
        "req_type" => req_type
    )
    .record(elapsed.as_secs_f64());
    metrics::counter!(
        REQUESTS_TOTAL,
        "url" => url_label,
        "req_type" => req_type,
        "status" => status_label,
        "message" => message
    )
    .increment(1);
}

/// URL as a label value; `=` is not allowed by some metric backends.
pub fn url_tag(url: &str) -> String {
    url.replace('=', "_is_")
}

/// Coarse request category derived from the URL path.
pub fn request_type(url: &str) -> &'static str {
    if url.contains("ping") {
        "ping"
    } else if url.contains("data/api") {
        "data-api"
    } else if url.contains("predict/api") {
        "predict-api"
    } else {
        "unknown"
    }
}

/// Categorise a transport error message.
pub fn error_category(message: &str) -> &'static str {
    let msg = message.to_lowercase();
    if msg.contains("time") && msg.contains("out") {
        if msg.contains("connect") {
            "connect-timeout"
        } else if msg.contains("read") {
            "read-timeout"
        } else {
            "timeout"
        }
    } else {
        "other"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Mutex, Once};

    static INIT: Once = Once::new();
    static TEST_HANDLE: Mutex<Option<metrics_exporter_prometheus::PrometheusHandle>> =
        Mutex::new(None);

    /// Install a process-wide Prometheus recorder once and hand out its handle.
    pub(crate) fn get_test_handle() -> metrics_exporter_prometheus::PrometheusHandle {
        INIT.call_once(|| {
            let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            *TEST_HANDLE.lock().unwrap() = Some(handle);
            metrics::set_global_recorder(Box::new(recorder)).ok();
        });

        TEST_HANDLE.lock().unwrap().as_ref().unwrap().clone()
    }

    #[test]
    fn test_request_type() {
        assert_eq!(request_type("https://h/predict/api/ping"), "ping");
        assert_eq!(request_type("https://h/data/api/demo/user?method=write"), "data-api");
        assert_eq!(request_type("https://h/predict/api/demo/home"), "predict-api");
        assert_eq!(request_type("https://h/RetailSaaS/Predict"), "unknown");
    }

    #[test]
    fn test_url_tag_replaces_equals() {
        assert_eq!(
            url_tag("https://h/data/api/demo/user?method=write"),
            "https://h/data/api/demo/user?method_is_write"
        );
    }

    #[test]
    fn test_error_category() {
        assert_eq!(error_category("Connect timed out"), "connect-timeout");
        assert_eq!(error_category("read timeout"), "read-timeout");
        assert_eq!(error_category("operation timed out"), "timeout");
        assert_eq!(error_category("connection refused"), "other");
    }

    #[test]
    fn test_probe_metrics_rendered() {
        let handle = get_test_handle();
        record_probe("probe-metrics.example.com", false, Duration::from_millis(12));
        record_failure_rate("probe-metrics.example.com", 0.5);

        let rendered = handle.render();
        assert!(rendered.contains(PROBES_TOTAL));
        assert!(rendered.contains("probe-metrics.example.com"));
        assert!(rendered.contains(HOST_FAILURE_RATE));
    }

    #[test]
    fn test_request_metrics_rendered() {
        let handle = get_test_handle();
        record_request(
            "https://request-metrics.example.com/data/api/demo/user?method=write",
            Duration::from_millis(40),
            &RequestStatus::Status(503),
        );

        let rendered = handle.render();
        assert!(rendered.contains(REQUESTS_TOTAL));
        assert!(rendered.contains("method_is_write"));
        assert!(rendered.contains("status=\"503\""));
    }
}
