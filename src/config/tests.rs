//! Configuration tests
//!
//! Round-trip of the generated template plus precedence between
//! environment, file and defaults.

use super::*;
use crate::catalog::CountStrategy;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the serialized default config parses back to the same values.
#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let config = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.password, DEFAULT_PASSWORD);
    assert_eq!(config.catalog.page_size, 50);
    assert_eq!(config.catalog.count_strategy, CountStrategy::GetIds);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

/// Non-default values, including characters that need escaping, survive.
#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.api_url = "http://localhost:9000/".to_string();
    config.password = "pa\"ss\\word".to_string();
    config.catalog.page_size = 20;
    config.catalog.count_strategy = CountStrategy::Filter;
    config.logging.file_rotation = LogRotation::Hourly;

    let file = Config::parse_file_config(&config.to_toml()).unwrap();
    let back = Config::resolve(file, no_env);

    assert_eq!(back.api_url, config.api_url);
    assert_eq!(back.password, config.password);
    assert_eq!(back.catalog.page_size, 20);
    assert_eq!(back.catalog.count_strategy, CountStrategy::Filter);
    assert_eq!(back.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::resolve(FileConfig::default(), no_env);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert!(config.enable_tui);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.catalog.detail_concurrency, 8);
}

#[test]
fn test_file_overrides_defaults() {
    let file = Config::parse_file_config(
        r#"
api_url = "http://file.example/"
[catalog]
page_size = 25
"#,
    )
    .unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.api_url, "http://file.example/");
    assert_eq!(config.catalog.page_size, 25);
    // Untouched sections keep defaults
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config(
        r#"
api_url = "http://file.example/"
password = "from-file"
[catalog]
page_size = 25
"#,
    )
    .unwrap();
    let env = env_from(&[
        ("CATALOG_API_URL", "http://env.example/"),
        ("CATALOG_PAGE_SIZE", "10"),
        ("CATALOG_NO_TUI", "1"),
    ]);
    let config = Config::resolve(file, env);

    assert_eq!(config.api_url, "http://env.example/");
    assert_eq!(config.password, "from-file");
    assert_eq!(config.catalog.page_size, 10);
    assert!(!config.enable_tui);
}

#[test]
fn test_invalid_values_fall_back() {
    let file = Config::parse_file_config(
        r#"
theme = "solarized"
[catalog]
page_size = 0
count_strategy = "guess"
[logging]
level = "verbose"
file_rotation = "weekly"
file_prefix = "  "
"#,
    )
    .unwrap();
    let env = env_from(&[("CATALOG_PAGE_SIZE", "lots"), ("CATALOG_TIMEOUT_SECS", "-1")]);
    let config = Config::resolve(file, env);

    assert_eq!(config.catalog.page_size, 50);
    assert_eq!(config.catalog.count_strategy, CountStrategy::GetIds);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_prefix, "catalog");
    assert_eq!(config.theme, "auto");
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_theme_env_falls_through_when_unknown() {
    let file = Config::parse_file_config("theme = \"nord\"\n").unwrap();

    let config = Config::resolve(file, env_from(&[("CATALOG_THEME", "neon")]));
    assert_eq!(config.theme, "nord");

    let file = Config::parse_file_config("theme = \"nord\"\n").unwrap();
    let config = Config::resolve(file, env_from(&[("CATALOG_THEME", "Gruvbox")]));
    assert_eq!(config.theme, "Gruvbox");
}

#[test]
fn test_log_level_is_normalized() {
    let file = Config::parse_file_config("[logging]\nlevel = \" DEBUG \"\n").unwrap();
    assert_eq!(Config::resolve(file, no_env).logging.level, "debug");
}

#[test]
fn test_malformed_file_is_an_error() {
    assert!(Config::parse_file_config("page_size = [").is_err());
    assert!(Config::parse_file_config("[catalog]\npage_size = \"fifty\"").is_err());
}

#[test]
fn test_client_settings_from_config() {
    let mut config = Config::default();
    config.request_timeout_secs = 0;
    let settings = config.client_settings();
    assert_eq!(settings.api_url, DEFAULT_API_URL);
    assert_eq!(settings.password, DEFAULT_PASSWORD);
    assert_eq!(settings.timeout, Duration::from_secs(1));
}
