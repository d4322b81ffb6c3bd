//! Configuration for the catalog browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/catalog-browser/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::api::ClientSettings;
use crate::theme::Theme;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod catalog;
mod logging;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use catalog::{CatalogSettings, FileCatalog};
pub use logging::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default catalog endpoint
pub const DEFAULT_API_URL: &str = "https://api.valantis.store:41000/";

/// Default shared secret for the credential
pub const DEFAULT_PASSWORD: &str = "Valantis";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_THEME: &str = "auto";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog endpoint URL
    pub api_url: String,

    /// Shared secret the X-Auth token is derived from
    pub password: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Whether to run the TUI (false = headless list of page 1)
    pub enable_tui: bool,

    /// Theme name: "auto", "dracula", "nord", "gruvbox"
    pub theme: String,

    /// Paging and fetching behavior
    pub catalog: CatalogSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_tui: true,
            theme: DEFAULT_THEME.to_string(),
            catalog: CatalogSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Settings for the HTTP client
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            password: self.password.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub password: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,

    /// Optional [catalog] section
    pub catalog: Option<FileCatalog>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/catalog-browser/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("catalog-browser").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Parse config file contents
    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the config file exists but cannot be read or
    /// parsed. A broken config should fail fast with a clear error, not
    /// silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Numbers written as strings (page_size = 50, not \"50\")");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `catalog config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge file config with environment lookups
    ///
    /// `env` is injected so precedence can be tested without touching the
    /// process environment.
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("CATALOG_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Password: env > file > default
        let password = env("CATALOG_PASSWORD")
            .or(file.password)
            .unwrap_or(defaults.password);

        // Timeout: env > file > default
        let request_timeout_secs = env("CATALOG_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .or(file.request_timeout_secs)
            .unwrap_or(defaults.request_timeout_secs);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("CATALOG_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Theme: env > file > default, unknown names skipped
        let known = |name: &String| Theme::NAMES.contains(&name.trim().to_lowercase().as_str());
        let theme = env("CATALOG_THEME")
            .filter(known)
            .or(file.theme.filter(known))
            .unwrap_or(defaults.theme);

        let mut catalog = CatalogSettings::from_file(file.catalog);
        if let Some(size) = env("CATALOG_PAGE_SIZE")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|n| *n > 0)
        {
            catalog.page_size = size;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            password,
            request_timeout_secs,
            enable_tui,
            theme,
            catalog,
            logging,
        }
    }
}
