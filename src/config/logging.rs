//! Logging configuration

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::invalid(
                "logging.format",
                format!("expected 'pretty' or 'json', got '{}'", s),
            )),
        }
    }
}

/// Parts of the client that can be given their own log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogComponent {
    /// Availability loop, host ranking and switches
    Availability,
    /// Signed HTTP requests and their bodies
    Dispatch,
    Client,
    Url,
    Metrics,
    Cli,
}

impl LogComponent {
    /// Module name, as written in configuration.
    pub fn name(self) -> &'static str {
        match self {
            LogComponent::Availability => "availability",
            LogComponent::Dispatch => "dispatch",
            LogComponent::Client => "client",
            LogComponent::Url => "url",
            LogComponent::Metrics => "metrics",
            LogComponent::Cli => "cli",
        }
    }

    /// `tracing` target prefix of the component's events.
    pub fn target(self) -> String {
        format!("rec_client::{}", self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base filter, a level or any `EnvFilter` directive list
    pub level: String,
    pub format: LogFormat,
    /// Per-component overrides, e.g. `availability = "debug"` to watch host switches
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_levels: BTreeMap<LogComponent, String>,
    /// Log decoded response bodies at debug level. They may carry user data.
    pub log_response_bodies: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
            log_response_bodies: false,
        }
    }
}

impl LoggingConfig {
    /// Raise or lower the level of one component.
    pub fn with_component_level(mut self, component: LogComponent, level: LevelFilter) -> Self {
        self.component_levels
            .insert(component, level.to_string().to_lowercase());
        self
    }

    /// Every component override must name a level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (component, level) in &self.component_levels {
            if level.parse::<LevelFilter>().is_err() {
                return Err(ConfigError::invalid(
                    &format!("logging.component_levels.{}", component.name()),
                    format!("unknown level '{}'", level),
                ));
            }
        }
        Ok(())
    }
}
