//! Output formatting helpers for CLI commands

use crate::availability::HostSnapshot;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format host snapshots as a table
pub fn format_hosts_table(hosts: &[HostSnapshot]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Host", "Status", "Failure Rate", "Latency", "Last Error"]);

    for h in hosts {
        let status_str = if h.current {
            "Current".green().bold().to_string()
        } else if h.available {
            "Available".green().to_string()
        } else {
            "Unavailable".red().to_string()
        };
        let latency = h
            .last_latency_ms
            .map(|ms| format!("{}ms", ms))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&h.host),
            Cell::new(status_str),
            Cell::new(format!("{:.1}%", h.failure_rate * 100.0)),
            Cell::new(latency),
            Cell::new(h.last_error.as_deref().unwrap_or("-")),
        ]);
    }

    table.to_string()
}

/// Format host snapshots as JSON
pub fn format_hosts_json(
    current_host: &str,
    hosts: &[HostSnapshot],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "current_host": current_host,
        "hosts": hosts,
    }))
}

/// Get status icon for a host
pub fn status_icon(host: &HostSnapshot) -> &'static str {
    if host.current {
        "★"
    } else if host.available {
        "✓"
    } else {
        "✗"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(host: &str, available: bool, current: bool) -> HostSnapshot {
        HostSnapshot {
            host: host.to_string(),
            failure_rate: if available { 0.0 } else { 0.5 },
            available,
            current,
            last_latency_ms: Some(12),
            last_probe_at: None,
            last_error: (!available).then(|| "HTTP status 503".to_string()),
        }
    }

    #[test]
    fn test_format_hosts_table() {
        let table = format_hosts_table(&[
            snapshot("rec-a.example.com", true, true),
            snapshot("rec-b.example.com", false, false),
        ]);
        assert!(table.contains("rec-a.example.com"));
        assert!(table.contains("50.0%"));
        assert!(table.contains("HTTP status 503"));
        assert!(table.contains("12ms"));
    }

    #[test]
    fn test_format_hosts_json() {
        let out = format_hosts_json("rec-a.example.com", &[snapshot("rec-a.example.com", true, true)])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["current_host"], "rec-a.example.com");
        assert_eq!(value["hosts"][0]["available"], true);
    }

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(&snapshot("a", true, true)), "★");
        assert_eq!(status_icon(&snapshot("a", true, false)), "✓");
        assert_eq!(status_icon(&snapshot("a", false, false)), "✗");
    }
}
