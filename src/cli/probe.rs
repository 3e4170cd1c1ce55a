//! Probe command implementation

use crate::availability::{HostAvailabilityTracker, HttpProber};
use crate::cli::output::{format_hosts_json, format_hosts_table, status_icon};
use crate::cli::{load_config, ProbeArgs};
use crate::config::ClientConfig;
use crate::url::UrlRefresher;
use std::fmt::Write;
use std::sync::Arc;

/// Logs host changes instead of rewriting URLs.
pub struct LogRefresher;

impl UrlRefresher for LogRefresher {
    fn refresh(&self, host: &str) {
        tracing::info!(host, "active host changed");
    }
}

/// Build a tracker for every host `config` resolves to.
///
/// Probing needs no credentials, so only the endpoint settings are validated.
pub fn build_tracker(
    config: &ClientConfig,
) -> Result<HostAvailabilityTracker, Box<dyn std::error::Error>> {
    let hosts = config.resolved_hosts();
    if hosts.is_empty() {
        return Err("No hosts configured. Set `hosts` or `region` (or REC_HOSTS/REC_REGION).".into());
    }
    config.validate_endpoints()?;

    let prober = HttpProber::new(
        &config.schema,
        &hosts,
        &config.availability,
        config.headers.clone(),
        config.host_header.clone().filter(|h| !h.trim().is_empty()),
    )?;

    Ok(HostAvailabilityTracker::new(
        hosts,
        config.availability.clone(),
        Arc::new(prober),
        Arc::new(LogRefresher),
    )?)
}

/// Handle `rec-client probe` command
pub async fn handle_probe(args: &ProbeArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    let tracker = build_tracker(&config)?;
    let rounds = args.rounds.max(1);

    for round in 0..rounds {
        if round > 0 {
            tokio::time::sleep(config.availability.probe_interval()).await;
        }
        tracker.tick().await;
    }

    let hosts = tracker.snapshot();
    tracker.shutdown();

    if args.json {
        return Ok(format_hosts_json(&tracker.current_host(), &hosts)?);
    }

    let mut output = format_hosts_table(&hosts);
    let current = hosts.iter().find(|h| h.current);
    if let Some(current) = current {
        write!(
            output,
            "\n{} Active host after {} round(s): {}",
            status_icon(current),
            rounds,
            current.host
        )?;
    }

    Ok(output)
}
