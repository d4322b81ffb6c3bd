//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML document
    ///
    /// Used both for the first-run template and `config --reset`.
    pub fn to_toml(&self) -> String {
        format!(
            r#"# catalog-browser configuration

# Catalog endpoint (all actions are POSTed here)
api_url = "{api_url}"

# Shared secret; X-Auth = md5("<password>_<YYYYMMDD>") in UTC
password = "{password}"

# Per-request timeout in seconds
request_timeout_secs = {timeout}

# Theme: auto, dracula, nord, gruvbox
theme = "{theme}"

# Paging and fetching
[catalog]
page_size = {page_size}
detail_concurrency = {concurrency}
# How the total count is requested: get_ids (with filter params) or filter
count_strategy = "{count_strategy}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = escape(&self.api_url),
            password = escape(&self.password),
            timeout = self.request_timeout_secs,
            theme = escape(&self.theme),
            page_size = self.catalog.page_size,
            concurrency = self.catalog.detail_concurrency,
            count_strategy = self.catalog.count_strategy.as_str(),
            log_level = escape(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }
}

/// Escape a value for a TOML basic string
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
