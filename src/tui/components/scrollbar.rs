//! Scrollbar rendering helper shared by the list panels

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Style},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a thumb-only vertical scrollbar inside the panel border
///
/// Nothing is drawn when the content fits.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, color: Color) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(Style::default().fg(color));

    let mut state = ScrollbarState::new(scroll.scroll_span()).position(scroll.offset());
    let track = area.inner(Margin {
        vertical: 1,
        horizontal: 0,
    });

    f.render_stateful_widget(scrollbar, track, &mut state);
}
