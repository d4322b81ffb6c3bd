// Catalog Browser - terminal client for a remote product catalog
//
// Lists product identifiers page by page, resolves each one to its details,
// and filters by product name, price or brand.
//
// Architecture:
// - API client (reqwest): one POST endpoint, per-day MD5 credential header
// - Catalog controller: page/filter state, request tickets against stale replies
// - TUI (ratatui): event loop over keys, ticks and request replies (mpsc)
// - Headless commands: `list` and `fields` print to stdout

mod api;
mod auth;
mod catalog;
mod cli;
mod config;
mod events;
mod headless;
mod logging;
mod theme;
mod tui;

use anyhow::{Context, Result};
use api::ApiClient;
use cli::{ListArgs, Mode};
use config::Config;
use logging::LogBuffer;

#[tokio::main]
async fn main() -> Result<()> {
    // Config commands are handled and exit here
    let Some(mode) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    // CATALOG_NO_TUI turns the bare invocation into `list` for page 1
    let mode = match mode {
        Mode::Tui if !config.enable_tui => Mode::List(ListArgs {
            page: 1,
            ..Default::default()
        }),
        other => other,
    };

    // In TUI mode logs are captured into the buffer (prevents garbling the
    // display); headless commands log to stderr
    let log_buffer = LogBuffer::new();
    let tui_buffer = matches!(mode, Mode::Tui).then(|| log_buffer.clone());
    let _file_guard = logging::init(&config.logging, tui_buffer);

    tracing::debug!(
        "catalog {} starting ({:?}, page size {}, count via {})",
        config::VERSION,
        mode,
        config.catalog.page_size,
        config.catalog.count_strategy.as_str()
    );

    let client =
        ApiClient::new(&config.client_settings()).context("Failed to create API client")?;

    match mode {
        Mode::Tui => tui::run_tui(&config, client, log_buffer).await,
        Mode::List(args) => headless::run_list(&config, &client, &args).await,
        Mode::Fields(field) => headless::run_fields(&client, field).await,
    }
}
