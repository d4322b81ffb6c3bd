// App state - the "model" of the TUI
//
// App owns the catalog controller and every component's view state. It never
// performs I/O: key presses and request replies come in, `Command`s describing
// the requests to issue go out, and the event loop hands those to a Fetcher.

use super::components::filter_panel::{self, FilterCommand};
use super::components::logs_panel::LogsPanel;
use super::components::pagination_bar::PaginationBar;
use super::components::product_list::ProductListPanel;
use super::components::Toast;
use super::traits::{ComponentId, Interactive, RenderContext};
use crate::api::models::{Action, Field, ProductId};
use crate::catalog::{ApplyOutcome, CatalogController, RequestTicket};
use crate::config::Config;
use crate::events::CatalogEvent;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

/// Requests App wants issued
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Ids and total count for the page identified by `ticket`
    LoadPage {
        ticket: RequestTicket,
        ids: Action,
        count: Action,
    },
    /// Details for every slot of the page
    LoadDetails {
        ticket: RequestTicket,
        slots: Vec<(usize, ProductId)>,
    },
    /// Observed values for a filter field
    LoadFieldValues {
        ticket: RequestTicket,
        field: Field,
        request: Action,
    },
}

/// Main application state
pub struct App {
    pub catalog: CatalogController,
    pub theme: Theme,
    pub focus: ComponentId,

    // Components
    pub products_panel: ProductListPanel,
    pub pagination_bar: PaginationBar,
    pub logs_panel: LogsPanel,

    /// Shared with the tracing layer
    pub log_buffer: LogBuffer,

    pub toast: Option<Toast>,
    pub should_quit: bool,
    pub show_logs: bool,

    /// Advanced on every tick; drives spinners
    pub animation_frame: usize,

    /// Shown in the status bar
    pub api_url: String,

    start_time: Instant,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        Self {
            catalog: CatalogController::new(
                config.catalog.page_size,
                config.catalog.count_strategy,
            ),
            theme: Theme::by_name(&config.theme),
            focus: ComponentId::Products,
            products_panel: ProductListPanel::new(),
            pagination_bar: PaginationBar::new(),
            logs_panel: LogsPanel::new(),
            log_buffer,
            toast: None,
            should_quit: false,
            show_logs: false,
            animation_frame: 0,
            api_url: config.api_url.clone(),
            start_time: Instant::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Display helpers
    // ─────────────────────────────────────────────────────────────

    /// Time since startup as HH:MM:SS
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    pub fn spinner_char(&self) -> char {
        self.render_context().spinner_char()
    }

    /// Ids not in yet, or some card still waiting for details
    pub fn is_loading(&self) -> bool {
        !self.catalog.is_loaded() || self.catalog.products().iter().any(|s| s.is_loading())
    }

    pub fn render_context(&self) -> RenderContext<'_> {
        RenderContext::new(&self.theme, self.focus, self.animation_frame)
    }

    /// Key hint for the focused panel
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            ComponentId::Products => self.products_panel.focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
            ComponentId::Filter => Some("↑↓:поле  Enter:применить  F2:значения  Esc:назад"),
            _ => None,
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    /// Timer tick: advance animations, expire the toast
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_focus(self.show_logs);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev_focus(self.show_logs);
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs && self.focus == ComponentId::Logs {
            self.focus = ComponentId::Products;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────

    fn load_page(&self, ticket: RequestTicket) -> Command {
        Command::LoadPage {
            ticket,
            ids: self.catalog.ids_request(),
            count: self.catalog.count_request(),
        }
    }

    /// First load, or a manual refresh of the current page and filter
    pub fn refresh(&mut self) -> Command {
        let ticket = self.catalog.reload();
        self.load_page(ticket)
    }

    fn submit_filter(&mut self) -> Option<Command> {
        match self.catalog.submit_form() {
            Ok(ticket) => {
                self.show_toast(format!("Фильтр: {}", self.catalog.filter()));
                Some(self.load_page(ticket))
            }
            Err(e) => {
                tracing::warn!("Filter rejected: {}", e);
                self.show_error(e.to_string());
                None
            }
        }
    }

    fn reset_filters(&mut self) -> Command {
        let ticket = self.catalog.on_reset_filters();
        self.show_toast("Фильтры сброшены");
        self.load_page(ticket)
    }

    // ─────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────

    /// Handle a key press
    ///
    /// Layered dispatch: global keys, then the filter form when it has focus,
    /// then app shortcuts, then the focused panel, then the pagination bar.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Layer 1: global
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('r') if ctrl => return Some(self.reset_filters()),
            KeyCode::Tab => {
                self.focus_next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return None;
            }
            _ => {}
        }

        // Layer 2: the filter form takes text input
        if self.focus == ComponentId::Filter {
            return match filter_panel::handle_key(self.catalog.form_mut(), key) {
                FilterCommand::Edited => None,
                FilterCommand::Submit => self.submit_filter(),
                FilterCommand::RequestValues(field) => {
                    let (ticket, request) = self.catalog.field_values_request(field);
                    Some(Command::LoadFieldValues {
                        ticket,
                        field,
                        request,
                    })
                }
                FilterCommand::Ignored => {
                    if key.code == KeyCode::Esc {
                        self.focus = ComponentId::Products;
                    }
                    None
                }
            };
        }

        // Layer 3: shortcuts
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('r') => return Some(self.refresh()),
            KeyCode::Char('l') => {
                self.toggle_logs();
                return None;
            }
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.focus = ComponentId::Filter;
                return None;
            }
            _ => {}
        }

        // Layer 4: focused panel
        let handled = match self.focus {
            ComponentId::Products => self.products_panel.handle_key(key),
            ComponentId::Logs => self.logs_panel.handle_key(key),
            _ => return None,
        };
        if handled.was_handled() {
            return None;
        }

        // Layer 5: page navigation
        self.pagination_bar.sync(*self.catalog.pagination());
        self.pagination_bar.handle_key(key);
        let intent = self.pagination_bar.take_intent()?;
        let ticket = self.catalog.navigate(intent)?;
        Some(self.load_page(ticket))
    }

    // ─────────────────────────────────────────────────────────────
    // Replies
    // ─────────────────────────────────────────────────────────────

    /// Apply a request reply; may ask for follow-up requests
    pub fn on_event(&mut self, event: CatalogEvent) -> Option<Command> {
        match event {
            CatalogEvent::Ids { ticket, result } => match self.catalog.apply_ids(ticket, result) {
                ApplyOutcome::Applied => Some(Command::LoadDetails {
                    ticket,
                    slots: self.catalog.detail_requests(),
                }),
                ApplyOutcome::Failed => {
                    self.show_error("Не удалось загрузить список товаров");
                    None
                }
                ApplyOutcome::Stale => None,
            },
            CatalogEvent::Count { ticket, result } => {
                let page = self.catalog.pagination().current_page();
                match self.catalog.apply_count(ticket, result) {
                    ApplyOutcome::Failed => {
                        self.show_error("Не удалось получить число товаров");
                        None
                    }
                    // The page ran past the end; load the one pagination moved to
                    ApplyOutcome::Applied if self.catalog.pagination().current_page() != page => {
                        Some(self.refresh())
                    }
                    _ => None,
                }
            }
            CatalogEvent::Detail {
                ticket,
                index,
                id,
                result,
            } => {
                // A failed card keeps its placeholder; the error is in the log
                self.catalog.apply_detail(ticket, index, &id, result);
                None
            }
            CatalogEvent::FieldValues {
                ticket,
                field,
                result,
            } => {
                match self.catalog.apply_field_values(ticket, field, result) {
                    ApplyOutcome::Applied if self.catalog.form().has_options() => {
                        self.catalog.form_mut().focus(field);
                        self.focus = ComponentId::Filter;
                    }
                    ApplyOutcome::Applied => {
                        self.show_toast(format!("Нет значений: {}", field.label()));
                    }
                    ApplyOutcome::Failed => {
                        self.show_error(format!("Не удалось получить значения: {}", field.label()))
                    }
                    ApplyOutcome::Stale => {}
                }
                None
            }
        }
    }
}
