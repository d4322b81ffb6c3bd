//! `[logging]` section
//!
//! Level for the `catalog` target and the optional JSON log file written
//! next to the TUI buffer or stderr output.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

/// Levels accepted for `[logging].level`
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// When the JSON log file starts a new segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file for the lifetime of the directory
    Never,
}

impl LogRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

impl FromStr for LogRotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "unknown rotation '{}' (expected hourly, daily or never)",
                other
            )),
        }
    }
}

/// Effective logging settings
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error; `RUST_LOG` wins over it
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem; the appender adds the date
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: default_log_dir(),
            file_rotation: LogRotation::Daily,
            file_prefix: "catalog".to_string(),
        }
    }
}

/// `[logging]` as written in the file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Unknown levels and rotations, and blank prefixes, keep the defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file
                .level
                .map(|l| l.trim().to_lowercase())
                .filter(|l| LEVELS.contains(&l.as_str()))
                .unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.file_rotation),
            file_prefix: file
                .file_prefix
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.file_prefix),
        }
    }
}

/// `<data dir>/catalog-browser/logs`, or `./logs` without a data dir
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("catalog-browser").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
