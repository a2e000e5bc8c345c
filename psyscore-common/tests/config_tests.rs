//! Integration tests for configuration resolution and graceful degradation
//!
//! Covers:
//! - Priority order: explicit path > environment variable > user config dir
//! - Missing or malformed config files fall back to compiled defaults
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate PSYSCORE_CONFIG are marked with #[serial].

use psyscore_common::config::{ConfigResolver, TomlConfig, CONFIG_ENV_VAR};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_explicit_path_wins_over_env_var() {
    let dir = TempDir::new().unwrap();
    let explicit = write_config(&dir, "explicit.toml", "[logging]\nlevel = \"debug\"\n");
    let from_env = write_config(&dir, "env.toml", "[logging]\nlevel = \"warn\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let resolver = ConfigResolver::new();
    assert_eq!(resolver.resolve_path(Some(&explicit)), Some(explicit.clone()));

    let config = resolver.load(Some(&explicit));
    assert_eq!(config.logging.level, "debug");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_var_used_without_explicit_path() {
    let dir = TempDir::new().unwrap();
    let from_env = write_config(&dir, "env.toml", "[logging]\nlevel = \"warn\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = ConfigResolver::new().load(None);
    assert_eq!(config.logging.level, "warn");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_custom_env_var_name() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "custom.toml", "[scoring]\ncritical_impact_threshold = 20.0\n");
    env::set_var("PSYSCORE_TEST_CUSTOM_CONFIG", &path);

    let resolver = ConfigResolver::with_env_var("PSYSCORE_TEST_CUSTOM_CONFIG");
    let config = resolver.try_load(None).unwrap();
    assert!(config.scoring.contains_key("critical_impact_threshold"));

    env::remove_var("PSYSCORE_TEST_CUSTOM_CONFIG");
}

#[test]
#[serial]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let resolver = ConfigResolver::new();
    assert!(resolver.try_load(Some(&missing)).is_err());

    let config = resolver.load(Some(&missing));
    assert_eq!(config.logging.level, "info");
    assert!(config.scoring.is_empty());
}

#[test]
#[serial]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "broken.toml", "[logging\nlevel = ");

    let config = ConfigResolver::new().load(Some(&path));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_round_trip_through_toml_text() {
    let original = TomlConfig::from_toml_str(
        "[logging]\nlevel = \"trace\"\njson = true\n\n[scoring]\nvalidity_threshold = 0.45\n",
    )
    .unwrap();

    let text = toml::to_string(&original).unwrap();
    let reparsed = TomlConfig::from_toml_str(&text).unwrap();
    assert_eq!(reparsed.logging.level, "trace");
    assert!(reparsed.logging.json);
    assert_eq!(reparsed.scoring, original.scoring);
}
