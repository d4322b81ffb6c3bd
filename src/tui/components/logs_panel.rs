//! Logs panel component
//!
//! Displays the entries captured by `TuiLogLayer`. The panel does not own the
//! `LogBuffer` (it is shared with the logging system); it mirrors the entry
//! count each frame and keeps its own scroll and selection state.

use super::formatters::truncate_to_width;
use super::scrollbar::render_scrollbar;
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Logs panel component
///
/// Follows new entries until the user scrolls or selects.
pub struct LogsPanel {
    scroll: ScrollState,

    /// Selected entry (None = follow mode)
    selected: Option<usize>,

    entries: Vec<LogEntry>,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            selected: None,
            entries: Vec::new(),
        }
    }

    /// Mirror the buffer contents and size the viewport for `area`
    pub fn sync_entries(&mut self, entries: Vec<LogEntry>, area: Rect) {
        self.entries = entries;
        self.scroll
            .update_dimensions(self.entries.len(), area.height.saturating_sub(2) as usize);

        if let Some(idx) = self.selected {
            if idx >= self.entries.len() {
                self.selected = self.entries.len().checked_sub(1);
            }
        }
    }

    fn title(&self, focused: bool) -> &'static str {
        if self.selected.is_some() && focused {
            " Журнал [выбор] "
        } else if self.scroll.auto_follow {
            " Журнал "
        } else {
            " Журнал [прокрутка] "
        }
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let width = area.width.saturating_sub(3) as usize;
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if focused && self.selected == Some(start + i) {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    log_level_style(entry.level, theme)
                };
                ListItem::new(truncate_to_width(&format_log_entry(entry), width)).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(ctx.border_color(self.id())))
                .title(self.title(focused)),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ctx.border_color(self.id()));
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for LogsPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index.min(self.entries.len().saturating_sub(1)));
        self.scroll.auto_follow = false;
    }

    fn item_count(&self) -> usize {
        self.entries.len()
    }

    /// Override: the first selection starts at the newest entry
    fn select_next(&mut self) {
        match self.selected {
            Some(idx) if idx + 1 < self.entries.len() => {
                self.select(idx + 1);
                self.scroll.ensure_visible(idx + 1);
            }
            None if !self.entries.is_empty() => self.select(self.entries.len() - 1),
            _ => {}
        }
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                if !self.entries.is_empty() {
                    self.selected = Some(0);
                }
                Handled::Yes
            }
            KeyCode::End => {
                self.selected = None;
                self.scroll_to_bottom();
                Handled::Yes
            }
            KeyCode::PageUp => {
                self.page_up();
                Handled::Yes
            }
            KeyCode::PageDown => {
                self.page_down();
                Handled::Yes
            }
            KeyCode::Esc if self.selected.is_some() => {
                // Back to follow mode
                self.selected = None;
                self.scroll.auto_follow = true;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:выбор  End:следить  Esc:сброс")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════════════════════

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::render_to_string;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        }
    }

    fn entries(n: usize) -> Vec<LogEntry> {
        (0..n)
            .map(|i| entry(LogLevel::Info, &format!("line {}", i)))
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn follows_newest_entries() {
        let mut panel = LogsPanel::new();
        let area = Rect::new(0, 0, 60, 5);
        panel.sync_entries(entries(10), area);
        assert_eq!(panel.scroll.visible_range(), (7, 10));

        panel.sync_entries(entries(12), area);
        assert_eq!(panel.scroll.visible_range(), (9, 12));
    }

    #[test]
    fn first_selection_starts_at_newest() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(entries(4), Rect::new(0, 0, 60, 10));

        panel.handle_key(key(KeyCode::Down));
        assert_eq!(panel.selected_index(), Some(3));

        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.selected_index(), Some(2));

        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::Yes);
        assert_eq!(panel.selected_index(), None);
        assert_eq!(panel.handle_key(key(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn selection_pauses_following() {
        let mut panel = LogsPanel::new();
        let area = Rect::new(0, 0, 60, 5);
        panel.sync_entries(entries(10), area);
        panel.handle_key(key(KeyCode::Home));
        assert_eq!(panel.scroll.visible_range(), (0, 3));

        panel.sync_entries(entries(11), area);
        assert_eq!(panel.scroll.visible_range(), (0, 3));
    }

    #[test]
    fn renders_level_and_message() {
        let mut panel = LogsPanel::new();
        panel.sync_entries(
            vec![entry(LogLevel::Error, "Failed to fetch product ids")],
            Rect::new(0, 0, 70, 4),
        );
        let theme = Theme::default();
        let text = render_to_string(70, 4, |f| {
            let ctx = RenderContext::new(&theme, ComponentId::Logs, 0);
            panel.render(f, f.area(), &ctx);
        });
        assert!(text.contains("ERROR Failed to fetch product ids"));
        assert!(text.contains("Журнал"));
    }
}
