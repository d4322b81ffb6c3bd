// Title bar component
//
// Renders the app name, a loading spinner and the active filter.

use crate::api::models::FilterCriteria;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title text; `spinner` is shown while requests are outstanding
pub fn title_text(filter: &FilterCriteria, spinner: Option<char>) -> String {
    let loading = spinner
        .map(|c| format!(" {} загрузка", c))
        .unwrap_or_default();
    format!(" 🛍 Каталог{} ──── {}", loading, filter)
}

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let spinner = app.is_loading().then(|| app.spinner_char());
    let title = Paragraph::new(title_text(app.catalog.filter(), spinner))
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title)),
        );

    f.render_widget(title, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Field, FilterValue};

    #[test]
    fn shows_unfiltered_state() {
        let text = title_text(&FilterCriteria::new(), None);
        assert!(text.contains("Каталог"));
        assert!(text.contains("без фильтра"));
    }

    #[test]
    fn shows_active_filter_and_spinner() {
        let filter = FilterCriteria::new().with(Field::Brand, FilterValue::Text("Piaget".into()));
        let text = title_text(&filter, Some('⠋'));
        assert!(text.contains("⠋ загрузка"));
        assert!(text.contains("brand=Piaget"));
    }
}
