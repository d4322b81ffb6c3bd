// Status bar component
//
// Renders the bottom line: uptime, loaded cards, total matches, page, key hint.

use super::formatters::format_count;
use super::pagination_bar::page_label;
use crate::catalog::pagination::Pagination;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the status bar reports
pub struct StatusInfo<'a> {
    pub uptime: String,
    /// Cards with details on the current page
    pub resolved: usize,
    /// Cards on the current page
    pub on_page: usize,
    pub pagination: Pagination,
    pub hint: Option<&'static str>,
    pub api_url: &'a str,
}

/// Status text for a terminal `width` columns wide
pub fn status_text(info: &StatusInfo, width: u16) -> String {
    let total = info
        .pagination
        .total_count()
        .map(format_count)
        .unwrap_or_else(|| "?".to_string());

    match Breakpoint::from_width(width) {
        Breakpoint::Compact => format!(
            " {} │ {}/{} │ {}/{}",
            info.uptime,
            info.resolved,
            info.on_page,
            info.pagination.current_page(),
            info.pagination.total_pages()
        ),
        bp => {
            let mut text = format!(
                " {} │ Загружено {}/{} │ Найдено {} │ {}",
                info.uptime,
                info.resolved,
                info.on_page,
                total,
                page_label(&info.pagination)
            );
            if let Some(hint) = info.hint {
                text.push_str(" │ ");
                text.push_str(hint);
            }
            if bp.at_least(Breakpoint::Wide) {
                text.push_str(" │ ");
                text.push_str(info.api_url);
            }
            text
        }
    }
}

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let info = StatusInfo {
        uptime: app.uptime(),
        resolved: app.products_panel.resolved_count(),
        on_page: app.catalog.products().len(),
        pagination: *app.catalog.pagination(),
        hint: app.focus_hint(),
        api_url: &app.api_url,
    };

    let status = Paragraph::new(status_text(&info, area.width))
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(total: Option<u64>) -> StatusInfo<'static> {
        let mut pagination = Pagination::new(50);
        if let Some(count) = total {
            pagination.set_total_count(count);
        }
        StatusInfo {
            uptime: "00:01:05".to_string(),
            resolved: 12,
            on_page: 50,
            pagination,
            hint: Some("←→:страницы"),
            api_url: "https://api.example/",
        }
    }

    #[test]
    fn normal_width_shows_counts_and_page() {
        let text = status_text(&info(Some(8004)), 100);
        assert!(text.contains("Загружено 12/50"));
        assert!(text.contains("Найдено 8 004"));
        assert!(text.contains("Страница 1 из 161"));
        assert!(text.contains("←→:страницы"));
        assert!(!text.contains("api.example"));
    }

    #[test]
    fn unknown_total_is_a_question_mark() {
        assert!(status_text(&info(None), 100).contains("Найдено ?"));
    }

    #[test]
    fn wide_adds_endpoint_and_compact_drops_labels() {
        assert!(status_text(&info(Some(10)), 140).contains("https://api.example/"));

        let compact = status_text(&info(Some(8004)), 40);
        assert!(compact.contains("12/50"));
        assert!(compact.contains("1/161"));
        assert!(!compact.contains("Загружено"));
    }
}
