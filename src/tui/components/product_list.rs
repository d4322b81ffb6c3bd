//! Product list component
//!
//! One card per identifier on the current page, in the order the service
//! returned them. Cards resolve independently: a card shows the loading text
//! until its own detail reply lands.

use super::formatters::truncate_to_width;
use super::scrollbar::render_scrollbar;
use crate::api::models::MISSING_BRAND;
use crate::catalog::product::{format_price, ProductSlot, LOADING_TEXT};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Rows per card: id, name, price, brand, spacer
const CARD_HEIGHT: usize = 5;

/// Product cards of the current page
pub struct ProductListPanel {
    scroll: ScrollState,
    selected: Option<usize>,
    slots: Vec<ProductSlot>,
    loaded: bool,
}

impl ProductListPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            selected: None,
            slots: Vec::new(),
            loaded: false,
        }
    }

    /// Mirror the controller's slots and size the viewport for `area`
    ///
    /// A different page (first id changed) scrolls back to the top.
    pub fn sync(&mut self, slots: &[ProductSlot], loaded: bool, area: Rect) {
        let new_page = self.slots.first().map(|s| &s.id) != slots.first().map(|s| &s.id);
        if new_page {
            self.selected = None;
            self.scroll.scroll_to_top();
        }

        self.slots = slots.to_vec();
        self.loaded = loaded;

        let viewport = (area.height.saturating_sub(2) as usize / CARD_HEIGHT).max(1);
        self.scroll.update_dimensions(self.slots.len(), viewport);

        if let Some(idx) = self.selected {
            if idx >= self.slots.len() {
                self.selected = self.slots.len().checked_sub(1);
            }
        }
    }

    /// Number of cards whose details have arrived
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_loading()).count()
    }

    fn card(&self, slot: &ProductSlot, width: usize, ctx: &RenderContext) -> Text<'static> {
        let theme = ctx.theme;
        let label = Style::default().fg(theme.muted);
        let id_line = Line::from(vec![
            Span::styled("ID: ", label),
            Span::styled(truncate_to_width(&slot.id.to_string(), width.saturating_sub(4)), label),
        ]);

        let Some(product) = slot.product() else {
            return Text::from(vec![
                id_line,
                Line::from(Span::styled(
                    format!("{} {}", ctx.spinner_char(), LOADING_TEXT),
                    Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
                )),
                Line::default(),
                Line::default(),
                Line::default(),
            ]);
        };

        let brand = product.brand_display();
        let brand_style = if brand == MISSING_BRAND {
            Style::default().fg(theme.muted)
        } else {
            Style::default().fg(theme.brand)
        };

        Text::from(vec![
            id_line,
            Line::from(vec![
                Span::styled("Название: ", label),
                Span::styled(
                    truncate_to_width(&product.product, width.saturating_sub(10)),
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Цена: ", label),
                Span::styled(format_price(product.price), Style::default().fg(theme.price)),
            ]),
            Line::from(vec![
                Span::styled("Бренд: ", label),
                Span::styled(truncate_to_width(brand, width.saturating_sub(7)), brand_style),
            ]),
            Line::default(),
        ])
    }

    fn title(&self) -> String {
        match self.selected {
            Some(idx) if !self.slots.is_empty() => {
                format!(" Товары [{}/{}] ", idx + 1, self.slots.len())
            }
            _ => format!(" Товары ({}) ", self.slots.len()),
        }
    }

    fn empty_message(&self, theme: &Theme) -> Paragraph<'static> {
        let text = if self.loaded {
            "Товары не найдены"
        } else {
            "Загрузка..."
        };
        Paragraph::new(Span::styled(text, Style::default().fg(theme.muted)))
    }
}

impl Default for ProductListPanel {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for ProductListPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Products
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(self.id())))
            .title(self.title());

        if self.slots.is_empty() {
            f.render_widget(self.empty_message(theme).block(block), area);
            return;
        }

        let width = area.width.saturating_sub(3) as usize;
        let focused = ctx.is_focused(self.id());
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.slots[start..end]
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let item = ListItem::new(self.card(slot, width, ctx));
                if focused && self.selected == Some(start + i) {
                    item.style(Style::default().bg(theme.selection).fg(theme.selection_fg))
                } else {
                    item
                }
            })
            .collect();

        f.render_widget(List::new(items).block(block), area);
        render_scrollbar(f, area, &self.scroll, ctx.border_color(self.id()));
    }
}

impl Scrollable for ProductListPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for ProductListPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index.min(self.slots.len().saturating_sub(1)));
    }

    fn item_count(&self) -> usize {
        self.slots.len()
    }
}

impl Interactive for ProductListPanel {
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
                if !self.slots.is_empty() {
                    self.selected = Some(0);
                }
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                self.selected = self.slots.len().checked_sub(1);
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
                self.selected = None;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:выбор  PgUp/PgDn:прокрутка")
    }
}
