//! CLI module for rec-client
//!
//! Command-line tooling around the host availability subsystem.
//!
//! # Commands
//!
//! - `probe` - Probe every configured host and print a health table
//! - `watch` - Run the availability tracker until Ctrl-C
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Write a starter config
//! rec-client config init
//!
//! # Probe the region's hosts five times
//! rec-client probe --rounds 5
//!
//! # Generate shell completions
//! rec-client completions bash > ~/.bash_completion.d/rec-client
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod probe;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use probe::handle_probe;
pub use watch::handle_watch;

use crate::config::ClientConfig;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// rec-client - recommendation service client tooling
#[derive(Parser, Debug)]
#[command(
    name = "rec-client",
    version,
    about = "Recommendation service client with host availability tracking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe configured hosts and report their health
    Probe(ProbeArgs),
    /// Track host availability until interrupted
    Watch(WatchArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "rec-client.toml", env = "REC_CONFIG")]
    pub config: PathBuf,

    /// Number of probe rounds
    #[arg(short, long, default_value = "3")]
    pub rounds: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "rec-client.toml", env = "REC_CONFIG")]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "rec-client.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load `path` if it exists, else defaults, then apply `REC_*` overrides.
pub fn load_config(path: &Path) -> Result<ClientConfig, crate::config::ConfigError> {
    let config = if path.exists() {
        ClientConfig::load(Some(path))?
    } else {
        ClientConfig::default()
    };
    Ok(config.with_env_overrides())
}
