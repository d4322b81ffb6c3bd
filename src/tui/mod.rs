// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, request replies)
// - Handing App's commands to the Fetcher

pub mod app;
pub mod components;
pub mod layout;
pub mod scroll;
pub mod traits;
pub mod ui;

use crate::api::ApiClient;
use crate::config::Config;
use crate::events::{CatalogEvent, Fetcher};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Command};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Capacity of the reply channel; one page of details fits comfortably
const EVENT_CHANNEL_SIZE: usize = 256;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: &Config, client: ApiClient, log_buffer: LogBuffer) -> Result<()> {
    let mut app = App::new(config, log_buffer);
    tracing::info!("Browsing {} (theme {})", client.api_url(), app.theme.name);

    let (event_tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let fetcher = Fetcher::new(client, event_tx, config.catalog.detail_concurrency);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let first_page = app.refresh();
    dispatch(&fetcher, first_page);

    let result = run_event_loop(&mut terminal, &mut app, &fetcher, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner animation, toast expiry)
/// 3. Request replies from the Fetcher's tasks
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetcher: &Fetcher,
    event_rx: &mut mpsc::Receiver<CatalogEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        let command = tokio::select! {
            command = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        return app.handle_key(key);
                    }
                }
                None
            } => command,

            _ = tick_interval.tick() => {
                app.tick();
                None
            }

            Some(reply) = event_rx.recv() => app.on_event(reply),
        };

        if let Some(command) = command {
            dispatch(fetcher, command);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Start the requests a command describes
fn dispatch(fetcher: &Fetcher, command: Command) {
    match command {
        Command::LoadPage { ticket, ids, count } => fetcher.fetch_page(ticket, ids, count),
        Command::LoadDetails { ticket, slots } => fetcher.fetch_details(ticket, slots),
        Command::LoadFieldValues {
            ticket,
            field,
            request,
        } => fetcher.fetch_field_values(ticket, field, request),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Frame, Terminal};

    /// Draw into an off-screen buffer and return its text, one line per row
    pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut draw = Some(draw);
        terminal
            .draw(|f| {
                if let Some(draw) = draw.take() {
                    draw(f);
                }
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
