//! Configuration module for rec-client
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. Builder setters / CLI arguments (highest priority)
//! 2. Environment variables (`REC_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use rec_client::config::{ClientConfig, Region};
//!
//! let toml = r#"
//! tenant = "retail_demo"
//! tenant_id = "012345"
//! token = "secret"
//! region = "cn"
//! "#;
//! let config: ClientConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.region, Region::Cn);
//! assert_eq!(config.resolved_hosts().len(), 2);
//! assert!(config.validate().is_ok());
//! ```

pub mod error;
pub mod logging;
pub mod region;

pub use error::ConfigError;
pub use logging::{LogComponent, LogFormat, LoggingConfig};
pub use region::Region;

// Re-export AvailabilityConfig from availability module
pub use crate::availability::AvailabilityConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Everything needed to build a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Tenant name embedded in URLs (sometimes called "project")
    pub tenant: String,
    /// Tenant id sent with every request and used for signing
    pub tenant_id: String,
    /// Secret used to sign requests
    pub token: String,
    /// `http` or `https`
    pub schema: String,
    /// Candidate hosts in priority order; empty means region defaults
    pub hosts: Vec<String>,
    pub region: Region,
    /// Headers added to every request and probe
    pub headers: HashMap<String, String>,
    /// Optional fixed `Host` header (virtual host)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_header: Option<String>,
    /// Default request timeout, overridable per request
    pub timeout_ms: u64,
    pub availability: AvailabilityConfig,
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tenant: String::new(),
            tenant_id: String::new(),
            token: String::new(),
            schema: "https".to_string(),
            hosts: Vec::new(),
            region: Region::Unknown,
            headers: HashMap::new(),
            host_header: None,
            timeout_ms: 10_000,
            availability: AvailabilityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports REC_* environment variables for credentials, hosts and logging.
    /// Invalid values are silently ignored (current values are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(tenant) = std::env::var("REC_TENANT") {
            self.tenant = tenant;
        }
        if let Ok(tenant_id) = std::env::var("REC_TENANT_ID") {
            self.tenant_id = tenant_id;
        }
        if let Ok(token) = std::env::var("REC_TOKEN") {
            self.token = token;
        }
        if let Ok(schema) = std::env::var("REC_SCHEMA") {
            self.schema = schema;
        }
        if let Ok(region) = std::env::var("REC_REGION") {
            if let Ok(r) = region.parse() {
                self.region = r;
            }
        }
        if let Ok(hosts) = std::env::var("REC_HOSTS") {
            self.hosts = hosts
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(level) = std::env::var("REC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("REC_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Explicit hosts, or the region's default hosts when none are set.
    pub fn resolved_hosts(&self) -> Vec<String> {
        if self.hosts.is_empty() {
            self.region.default_hosts()
        } else {
            self.hosts.clone()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tenant.is_empty() {
            return Err(ConfigError::MissingField("tenant".to_string()));
        }
        if self.tenant_id.is_empty() {
            return Err(ConfigError::MissingField("tenant_id".to_string()));
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingField("token".to_string()));
        }
        if self.region == Region::Unknown {
            return Err(ConfigError::MissingField("region".to_string()));
        }
        self.logging.validate()?;
        self.validate_endpoints()
    }

    /// Validate the settings needed to reach and probe hosts: schema, host
    /// list and availability. Credentials are not required.
    pub fn validate_endpoints(&self) -> Result<(), ConfigError> {
        if self.schema != "http" && self.schema != "https" {
            return Err(ConfigError::invalid(
                "schema",
                format!("expected 'http' or 'https', got '{}'", self.schema),
            ));
        }

        let hosts = self.resolved_hosts();
        if hosts.is_empty() {
            return Err(ConfigError::invalid("hosts", "at least one host is required"));
        }
        for (i, host) in hosts.iter().enumerate() {
            if host.trim().is_empty() {
                return Err(ConfigError::invalid(
                    &format!("hosts[{}]", i),
                    "host cannot be empty",
                ));
            }
            if hosts[..i].contains(host) {
                return Err(ConfigError::invalid(
                    &format!("hosts[{}]", i),
                    format!("duplicate host '{}'", host),
                ));
            }
        }

        self.availability.validate()
    }
}
