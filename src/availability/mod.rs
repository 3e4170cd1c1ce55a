//! Host availability tracking.
//!
//! A background task probes every configured host on a fixed interval,
//! keeps a sliding window of outcomes per host, ranks the hosts by failure
//! rate and switches the active host when a better one appears. Every URL
//! holder registered with the tracker is refreshed before the switch becomes
//! visible through [`HostAvailabilityTracker::current_host`].

mod config;
mod error;
mod prober;
mod window;


pub use config::*;
pub use error::*;
pub use prober::*;
pub use window::*;

use crate::url::UrlRefresher;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use futures::future::join_all;
use futures::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Rebinds a dedicated HTTP connection to a newly selected host.
///
/// Only wired up when requests carry a fixed virtual host header, where the
/// connection target can no longer be derived from the URL alone.
pub trait ConnectionRebinder: Send + Sync {
    fn rebind(&self, host: &str);
}

/// Point-in-time view of one host, for diagnostics and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct HostSnapshot {
    pub host: String,
    pub failure_rate: f64,
    pub available: bool,
    pub current: bool,
    pub last_latency_ms: Option<u64>,
    pub last_probe_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone)]
struct LastProbe {
    latency: Duration,
    at: DateTime<Utc>,
    error: Option<String>,
}

struct TrackerShared {
    /// Configured hosts in priority order, never empty
    hosts: Vec<String>,
    config: AvailabilityConfig,
    windows: DashMap<String, SlidingWindow>,
    last_probes: DashMap<String, LastProbe>,
    current_host: ArcSwap<String>,
    available_hosts: ArcSwap<Vec<String>>,
    prober: Arc<dyn Prober>,
    refresher: Arc<dyn UrlRefresher>,
    rebinder: OnceLock<Arc<dyn ConnectionRebinder>>,
    started: AtomicBool,
    cancel: CancellationToken,
}

/// Keeps track of which configured host requests should go to.
///
/// Dropping the tracker stops its background task after the current tick.
pub struct HostAvailabilityTracker {
    shared: Arc<TrackerShared>,
}

impl HostAvailabilityTracker {
    /// Create a tracker for `hosts`. The first host is current until the
    /// first probe cycle says otherwise.
    ///
    /// Fails on an empty or repeated host list and on settings that
    /// [`AvailabilityConfig::validate`] rejects.
    pub fn new(
        hosts: Vec<String>,
        config: AvailabilityConfig,
        prober: Arc<dyn Prober>,
        refresher: Arc<dyn UrlRefresher>,
    ) -> Result<Self, TrackerError> {
        let first = hosts.first().cloned().ok_or(TrackerError::NoHosts)?;
        config.validate()?;

        let windows = DashMap::with_capacity(hosts.len());
        for host in &hosts {
            if windows.insert(host.clone(), SlidingWindow::new(config.window_size)).is_some() {
                return Err(TrackerError::DuplicateHost(host.clone()));
            }
        }

        Ok(Self {
            shared: Arc::new(TrackerShared {
                available_hosts: ArcSwap::from_pointee(hosts.clone()),
                current_host: ArcSwap::from_pointee(first),
                hosts,
                config,
                windows,
                last_probes: DashMap::new(),
                prober,
                refresher,
                rebinder: OnceLock::new(),
                started: AtomicBool::new(false),
                cancel: CancellationToken::new(),
            }),
        })
    }

    /// Attach a connection rebinder notified on every host switch.
    pub fn with_rebinder(self, rebinder: Arc<dyn ConnectionRebinder>) -> Self {
        if self.shared.rebinder.set(rebinder).is_err() {
            tracing::warn!("connection rebinder already attached, keeping the first one");
        }
        self
    }

    /// Spawn the probe loop on the current tokio runtime.
    ///
    /// Only one loop runs per tracker; later calls return
    /// [`TrackerError::AlreadyStarted`].
    pub fn start(&self) -> Result<JoinHandle<()>, TrackerError> {
        if self.shared.started.swap(true, Ordering::AcqRel) {
            return Err(TrackerError::AlreadyStarted);
        }

        let shared = Arc::clone(&self.shared);
        Ok(tokio::spawn(async move {
            let period = shared.config.probe_interval().max(Duration::from_millis(1));
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::info!(
                hosts = shared.hosts.len(),
                interval_ms = period.as_millis() as u64,
                "Host availability tracker started"
            );

            loop {
                tokio::select! {
                    biased;
                    _ = shared.cancel.cancelled() => {
                        tracing::info!("Host availability tracker shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(panic) = AssertUnwindSafe(shared.tick()).catch_unwind().await {
                            tracing::error!(
                                panic = %panic_message(panic.as_ref()),
                                "Host availability tick panicked, continuing"
                            );
                        }
                    }
                }
            }
        }))
    }

    /// Run one probe-rank-switch cycle.
    pub async fn tick(&self) {
        self.shared.tick().await;
    }

    /// Stop probing. Returns immediately; a probe already in flight finishes.
    pub fn shutdown(&self) {
        self.shared.cancel.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// Host requests are currently directed at.
    pub fn current_host(&self) -> String {
        self.shared.current_host.load().as_ref().clone()
    }

    /// Hosts under the failure threshold, best first.
    pub fn available_hosts(&self) -> Vec<String> {
        self.shared.available_hosts.load().as_ref().clone()
    }

    pub fn hosts(&self) -> &[String] {
        &self.shared.hosts
    }

    pub fn config(&self) -> &AvailabilityConfig {
        &self.shared.config
    }

    /// Failure rate of a configured host, `None` for unknown hosts.
    pub fn failure_rate(&self, host: &str) -> Option<f64> {
        self.shared.failure_rate(host)
    }

    pub fn snapshot(&self) -> Vec<HostSnapshot> {
        let current = self.shared.current_host.load();
        let available = self.shared.available_hosts.load();

        self.shared
            .hosts
            .iter()
            .map(|host| {
                let last = self.shared.last_probes.get(host).map(|p| p.value().clone());
                HostSnapshot {
                    host: host.clone(),
                    failure_rate: self.shared.failure_rate(host).unwrap_or(1.0),
                    available: available.contains(host),
                    current: current.as_str() == host,
                    last_latency_ms: last.as_ref().map(|p| p.latency.as_millis() as u64),
                    last_probe_at: last.as_ref().map(|p| p.at),
                    last_error: last.and_then(|p| p.error),
                }
            })
            .collect()
    }
}

impl Drop for HostAvailabilityTracker {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}

impl std::fmt::Debug for HostAvailabilityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostAvailabilityTracker")
            .field("hosts", &self.shared.hosts)
            .field("current_host", &self.shared.current_host.load_full())
            .field("shutdown", &self.shared.cancel.is_cancelled())
            .finish()
    }
}

impl TrackerShared {
    async fn tick(&self) {
        let outcomes = join_all(self.hosts.iter().map(|host| self.prober.probe(host))).await;

        for (host, outcome) in self.hosts.iter().zip(outcomes) {
            self.record(host, outcome);
        }

        self.recompute();
    }

    fn record(&self, host: &str, outcome: ProbeOutcome) {
        if let Some(mut window) = self.windows.get_mut(host) {
            window.put(outcome.success);
            crate::metrics::record_failure_rate(host, window.failure_rate());
        }
        self.last_probes.insert(
            host.to_string(),
            LastProbe {
                latency: outcome.latency,
                at: Utc::now(),
                error: outcome.error.map(|e| e.to_string()),
            },
        );
    }

    fn recompute(&self) {
        let available = rank_available_hosts(
            &self.hosts,
            |host| self.failure_rate(host).unwrap_or(1.0),
            self.config.failure_rate_threshold,
        );
        let Some(preferred) = preferred_host(&available, &self.hosts).map(str::to_string) else {
            return;
        };

        self.available_hosts.store(Arc::new(available));
        self.switch_host(preferred);
    }

    fn switch_host(&self, new_host: String) {
        let current = self.current_host.load_full();
        if *current == new_host {
            return;
        }

        tracing::warn!(from = %current, to = %new_host, "switch host");
        // URLs must point at the new host before anyone can read it as current.
        self.refresher.refresh(&new_host);
        if let Some(rebinder) = self.rebinder.get() {
            rebinder.rebind(&new_host);
        }
        crate::metrics::record_host_switch(&current, &new_host);
        self.current_host.store(Arc::new(new_host));
    }

    fn failure_rate(&self, host: &str) -> Option<f64> {
        self.windows.get(host).map(|w| w.failure_rate())
    }
}

/// Hosts whose failure rate is below `threshold`, ascending by failure rate.
///
/// The sort is stable, so hosts with equal rates keep their configured order.
pub fn rank_available_hosts<F>(hosts: &[String], failure_rate: F, threshold: f64) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut ranked: Vec<(&String, f64)> = hosts
        .iter()
        .map(|host| (host, failure_rate(host)))
        .filter(|(_, rate)| *rate < threshold)
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().map(|(host, _)| host.clone()).collect()
}

/// Best available host, or the first configured host when none is available.
pub fn preferred_host<'a>(available: &'a [String], hosts: &'a [String]) -> Option<&'a str> {
    available.first().or_else(|| hosts.first()).map(String::as_str)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
