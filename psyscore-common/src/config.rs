//! Configuration loading and config file resolution

use crate::logging::LoggingConfig;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PSYSCORE_CONFIG";

/// Top-level TOML configuration document
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [scoring]
/// validity_threshold = 0.4
/// ```
///
/// The `scoring` table is kept as raw TOML so the engine crate can map it
/// onto its own parameter struct without this crate knowing its shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scoring parameter overrides (engine-defined shape)
    #[serde(default)]
    pub scoring: toml::Table,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Map the `scoring` table onto a caller-defined struct
    pub fn scoring_as<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(toml::Value::Table(self.scoring.clone()).try_into()?)
    }
}

/// Config file resolution following priority order:
/// 1. Explicit path (highest priority)
/// 2. Environment variable
/// 3. User config directory (`<config_dir>/psyscore/config.toml`)
/// 4. None - compiled defaults apply
pub struct ConfigResolver {
    env_var_name: String,
}

impl ConfigResolver {
    /// Resolver using the standard `PSYSCORE_CONFIG` variable
    pub fn new() -> Self {
        Self::with_env_var(CONFIG_ENV_VAR)
    }

    /// Resolver reading a custom environment variable
    pub fn with_env_var(env_var_name: impl Into<String>) -> Self {
        Self {
            env_var_name: env_var_name.into(),
        }
    }

    /// Locate the config file to use, if any
    pub fn resolve_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        // Priority 1: Explicit path
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        // Priority 2: Environment variable
        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        // Priority 3: User config directory
        dirs::config_dir()
            .map(|d| d.join("psyscore").join("config.toml"))
            .filter(|p| p.exists())
    }

    /// Load configuration, falling back to defaults on any failure
    ///
    /// A missing or unreadable config file never aborts: it is logged and
    /// compiled defaults are used instead.
    pub fn load(&self, explicit: Option<&Path>) -> TomlConfig {
        match self.try_load(explicit) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load configuration, using defaults: {}", e);
                TomlConfig::default()
            }
        }
    }

    /// Load configuration, surfacing parse and I/O errors
    pub fn try_load(&self, explicit: Option<&Path>) -> Result<TomlConfig> {
        let Some(path) = self.resolve_path(explicit) else {
            debug!("No config file found, using compiled defaults");
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        debug!(path = %path.display(), "Loading configuration");
        TomlConfig::from_file(&path)
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let config = TomlConfig::from_toml_str(
            r#"
            [logging]
            level = "debug"
            json = true

            [scoring]
            validity_threshold = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(
            config.scoring.get("validity_threshold").and_then(|v| v.as_float()),
            Some(0.5)
        );
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.scoring.is_empty());
    }

    #[test]
    fn test_malformed_document_is_error() {
        let result = TomlConfig::from_toml_str("[logging\nlevel = ");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_scoring_as_maps_table() {
        #[derive(Deserialize)]
        struct Partial {
            validity_threshold: f64,
        }

        let config = TomlConfig::from_toml_str("[scoring]\nvalidity_threshold = 0.35").unwrap();
        let partial: Partial = config.scoring_as().unwrap();
        assert_eq!(partial.validity_threshold, 0.35);
    }
}
