//! Pagination bar component
//!
//! Renders "Страница X из Y" between the previous/next affordances and turns
//! key presses into `PageIntent`s. The bar never changes the page itself:
//! App takes the intent and hands it to the controller.

use crate::catalog::pagination::{PageIntent, Pagination};
use crate::theme::Theme;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const PREV_LABEL: &str = "Предыдущая";
pub const NEXT_LABEL: &str = "Следующая";

/// Page indicator text
pub fn page_label(pagination: &Pagination) -> String {
    format!(
        "Страница {} из {}",
        pagination.current_page(),
        pagination.total_pages()
    )
}

/// Pagination bar state: a copy of the pagination plus the pending intent
#[derive(Debug, Default)]
pub struct PaginationBar {
    state: Pagination,
    requested: Option<PageIntent>,
}

impl PaginationBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the controller's pagination (call before render and input)
    pub fn sync(&mut self, pagination: Pagination) {
        self.state = pagination;
    }

    /// Take the intent recorded by the last key press, if any
    pub fn take_intent(&mut self) -> Option<PageIntent> {
        self.requested.take()
    }

    /// Record an intent if the matching affordance is enabled
    ///
    /// Disabled affordances swallow the press without emitting anything.
    pub fn press(&mut self, intent: PageIntent) {
        let enabled = match intent {
            PageIntent::Prev => self.state.can_prev(),
            PageIntent::Next => self.state.can_next(),
        };
        if enabled {
            self.requested = Some(intent);
        }
    }

    fn line(&self, theme: &Theme) -> Line<'static> {
        let affordance = |label: String, enabled: bool| {
            let style = if enabled {
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted).add_modifier(Modifier::DIM)
            };
            Span::styled(label, style)
        };

        Line::from(vec![
            affordance(format!("◀ {}", PREV_LABEL), self.state.can_prev()),
            Span::raw("   "),
            Span::styled(page_label(&self.state), Style::default().fg(theme.foreground)),
            Span::raw("   "),
            affordance(format!("{} ▶", NEXT_LABEL), self.state.can_next()),
        ])
    }
}

impl Component for PaginationBar {
    fn id(&self) -> ComponentId {
        ComponentId::Pagination
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let bar = Paragraph::new(self.line(ctx.theme))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_type(ctx.theme.border_type)
                    .border_style(Style::default().fg(ctx.theme.border)),
            );
        f.render_widget(bar, area);
    }
}

impl Interactive for PaginationBar {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Left | KeyCode::Char('[') | KeyCode::Char('p') => {
                self.press(PageIntent::Prev);
                Handled::Yes
            }
            KeyCode::Right | KeyCode::Char(']') | KeyCode::Char('n') => {
                self.press(PageIntent::Next);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("←→:страницы")
    }
}
