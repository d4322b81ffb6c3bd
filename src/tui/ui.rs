// UI rendering logic
//
// Called on every frame. Components are synced with the controller state
// first (so their scroll math sees the current page), then drawn.
//
// ┌ title ──────────────────────────────┐
// │ filter form                         │
// │ products            │ logs (wide)   │
// │ logs (normal width, when shown)     │
// │ pagination                          │
// └ status ─────────────────────────────┘

use super::app::App;
use super::components::{filter_panel, status_bar, title_bar};
use super::layout::Breakpoint;
use super::traits::Component;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

/// Height of the logs panel when it sits below the products
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg, f.area());

    let filter_height = filter_panel::height(app.catalog.form());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title
            Constraint::Length(filter_height), // Filter form
            Constraint::Min(5),                // Products (+ logs)
            Constraint::Length(2),             // Pagination
            Constraint::Length(2),             // Status
        ])
        .split(f.area());

    let (products_area, logs_area) = split_main(chunks[2], app.show_logs);

    // Sync component state before anything reads it
    app.products_panel.sync(
        app.catalog.products(),
        app.catalog.is_loaded(),
        products_area,
    );
    if let Some(area) = logs_area {
        app.logs_panel.sync_entries(app.log_buffer.get_all(), area);
    }
    app.pagination_bar.sync(*app.catalog.pagination());

    let app = &*app;
    let ctx = app.render_context();

    title_bar::render(f, chunks[0], app);
    filter_panel::render(f, chunks[1], app.catalog.form(), &ctx);
    app.products_panel.render(f, products_area, &ctx);
    if let Some(area) = logs_area {
        app.logs_panel.render(f, area, &ctx);
    }
    app.pagination_bar.render(f, chunks[3], &ctx);
    status_bar::render(f, chunks[4], app);

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

/// Split the main area into products and (optionally) logs
///
/// Wide terminals put the logs to the right, narrower ones below.
fn split_main(area: Rect, show_logs: bool) -> (Rect, Option<Rect>) {
    if !show_logs {
        return (area, None);
    }

    let chunks = if Breakpoint::from_width(area.width).logs_beside() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(LOGS_HEIGHT)])
            .split(area)
    };
    (chunks[0], Some(chunks[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Product, ProductId};
    use crate::config::Config;
    use crate::events::CatalogEvent;
    use crate::logging::LogBuffer;
    use crate::tui::app::Command;
    use crate::tui::test_support::render_to_string;

    fn app_with_page() -> App {
        let mut app = App::new(&Config::default(), LogBuffer::new());
        let Command::LoadPage { ticket, .. } = app.refresh() else {
            panic!("refresh must load a page");
        };
        app.on_event(CatalogEvent::Ids {
            ticket,
            result: Ok(vec![ProductId::from("a1"), ProductId::from("a2")]),
        });
        app.on_event(CatalogEvent::Count {
            ticket,
            result: Ok((0..120).map(|i| ProductId::from(format!("{}", i).as_str())).collect()),
        });
        app.on_event(CatalogEvent::Detail {
            ticket,
            index: 0,
            id: ProductId::from("a1"),
            result: Ok(Some(Product {
                id: ProductId::from("a1"),
                product: "Золотое кольцо".into(),
                price: 16700.0,
                brand: None,
            })),
        });
        app
    }

    #[test]
    fn split_main_places_logs_by_width() {
        let (_, none) = split_main(Rect::new(0, 0, 100, 30), false);
        assert!(none.is_none());

        let (products, logs) = split_main(Rect::new(0, 0, 100, 30), true);
        let logs = logs.unwrap();
        assert_eq!(logs.height, LOGS_HEIGHT);
        assert!(logs.y > products.y);

        let (products, logs) = split_main(Rect::new(0, 0, 150, 30), true);
        assert!(logs.unwrap().x > products.x);
    }

    #[test]
    fn full_frame_shows_every_region() {
        let mut app = app_with_page();
        let text = render_to_string(100, 40, |f| draw(f, &mut app));

        assert!(text.contains("Каталог"));
        assert!(text.contains("Применить фильтр"));
        assert!(text.contains("Название: Золотое кольцо"));
        assert!(text.contains("Бренд: Н/Д"));
        assert!(text.contains("Загрузка данных о продукте..."));
        assert!(text.contains("Страница 1 из 3"));
        assert!(text.contains("Загружено 1/2"));
    }

    #[test]
    fn logs_panel_appears_when_toggled() {
        let mut app = app_with_page();
        app.toggle_logs();
        let text = render_to_string(100, 40, |f| draw(f, &mut app));
        assert!(text.contains("Журнал"));
    }
}
