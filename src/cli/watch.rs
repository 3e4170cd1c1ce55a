//! Watch command implementation

use crate::cli::probe::build_tracker;
use crate::cli::{load_config, WatchArgs};
use crate::logging::init_tracing;

/// Handle `rec-client watch` command
///
/// Runs the availability tracker in the background and logs every host
/// switch until Ctrl-C.
pub async fn handle_watch(args: &WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging)?;

    let tracker = build_tracker(&config)?;
    let handle = tracker.start()?;

    tracing::info!(
        hosts = ?tracker.hosts(),
        current = %tracker.current_host(),
        "Watching host availability, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;

    tracker.shutdown();
    handle.await?;

    for host in tracker.snapshot() {
        tracing::info!(
            host = %host.host,
            failure_rate = host.failure_rate,
            available = host.available,
            current = host.current,
            "final host state"
        );
    }

    Ok(())
}
