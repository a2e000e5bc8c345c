//! Logging initialisation for host processes
//!
//! The scoring crates only emit `tracing` events; installing a subscriber is
//! left to whichever process embeds them. This module provides the standard
//! way to do that from a [`LoggingConfig`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Logging configuration (`[logging]` table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output (default: false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Build the env filter: `RUST_LOG` wins, configured level otherwise
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))
}

/// Install the global tracing subscriber
///
/// Fails if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.json {
        builder
            .json()
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
    } else {
        builder
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
    }
}
