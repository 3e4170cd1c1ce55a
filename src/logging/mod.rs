//! Tracing setup helpers.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. These helpers are what the `rec-client` binary uses
//! and are handy for applications without their own logging setup.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use rec_client::config::{LogComponent, LoggingConfig};
/// use rec_client::logging::build_filter_directives;
/// use tracing::level_filters::LevelFilter;
///
/// let config = LoggingConfig::default()
///     .with_component_level(LogComponent::Availability, LevelFilter::DEBUG);
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "warn,rec_client::availability=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    for (component, level) in &config.component_levels {
        filter_str.push_str(&format!(",{}={}", component.target(), level));
    }

    filter_str
}

/// Install a global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured levels.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let filter_str = build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogComponent;

    #[test]
    fn test_filter_without_components() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_components_sorted() {
        let mut config = LoggingConfig {
            level: "info".to_string(),
            ..Default::default()
        };
        config
            .component_levels
            .insert(LogComponent::Dispatch, "trace".to_string());
        config
            .component_levels
            .insert(LogComponent::Availability, "debug".to_string());

        assert_eq!(
            build_filter_directives(&config),
            "info,rec_client::availability=debug,rec_client::dispatch=trace"
        );
    }

    #[test]
    fn test_init_rejects_unknown_component_level() {
        let mut config = LoggingConfig::default();
        config
            .component_levels
            .insert(LogComponent::Cli, "chatty".to_string());
        assert!(init_tracing(&config).is_err());
    }
}
