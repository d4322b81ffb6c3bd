//! Filter panel
//!
//! Draws the filter form and translates keys into form edits. The form itself
//! lives in the controller, so this module is a pair of free functions rather
//! than a stateful component: `handle_key` mutates the draft and reports what
//! App should do next, `render` draws it.

use super::formatters::truncate_to_width;
use crate::api::models::Field;
use crate::catalog::filter_form::FilterForm;
use crate::tui::traits::{ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const APPLY_LABEL: &str = "Применить фильтр";
pub const RESET_LABEL: &str = "Сбросить фильтры";

/// Options listed at once while a field is expanded
const MAX_OPTIONS: usize = 6;

/// Result of a key press in the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCommand {
    /// Key not used by the panel
    Ignored,
    /// Draft or selection changed; nothing to send
    Edited,
    /// Fetch the observed values of a field
    RequestValues(Field),
    /// Commit the draft as the active filter
    Submit,
}

/// Label of the "fetch values" button for `field`
pub fn values_label(field: Field) -> String {
    match field {
        Field::Brand => "Получить бренды".to_string(),
        other => format!("Получить значения: {}", other.label().to_lowercase()),
    }
}

/// Apply `key` to the form
pub fn handle_key(form: &mut FilterForm, key: KeyEvent) -> FilterCommand {
    if form.has_options() {
        match key.code {
            KeyCode::Up => {
                form.option_up();
                return FilterCommand::Edited;
            }
            KeyCode::Down => {
                form.option_down();
                return FilterCommand::Edited;
            }
            KeyCode::Enter => {
                form.choose_highlighted();
                return FilterCommand::Edited;
            }
            KeyCode::Esc => {
                form.reset();
                return FilterCommand::Edited;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Up => {
            form.focus_prev();
            FilterCommand::Edited
        }
        KeyCode::Down => {
            form.focus_next();
            FilterCommand::Edited
        }
        KeyCode::Enter => FilterCommand::Submit,
        KeyCode::F(2) => FilterCommand::RequestValues(form.active_field()),
        KeyCode::Backspace => {
            form.backspace();
            FilterCommand::Edited
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_active();
            FilterCommand::Edited
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.push_char(c);
            FilterCommand::Edited
        }
        _ => FilterCommand::Ignored,
    }
}

/// Rows the panel needs, borders included
pub fn height(form: &FilterForm) -> u16 {
    // Three inputs and the button row
    let base = 2 + Field::ALL.len() as u16 + 1;
    if form.has_options() {
        base + 1 + form.options().len().min(MAX_OPTIONS) as u16
    } else {
        base
    }
}

/// Draw the form into `area`
pub fn render(f: &mut Frame, area: Rect, form: &FilterForm, ctx: &RenderContext) {
    let theme = ctx.theme;
    let focused = ctx.is_focused(ComponentId::Filter);
    let label_width = Field::ALL
        .iter()
        .map(|field| field.label().chars().count())
        .max()
        .unwrap_or(0)
        + 2;
    let input_width = (area.width as usize).saturating_sub(label_width + 4);

    let mut lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            let active = focused && form.active_field() == field;
            let marker = if active { "›" } else { " " };
            let label = format!("{:<width$}", format!("{}:", field.label()), width = label_width);
            let mut value = truncate_to_width(form.input(field), input_width);
            if active {
                value.push('▏');
            }
            let value_style = if active {
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.highlight)),
                Span::styled(label, Style::default().fg(theme.muted)),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    if let Some(field) = form.selected_field().filter(|_| form.has_options()) {
        lines.push(Line::from(Span::styled(
            format!(" {} ({}):", field.label(), form.options().len()),
            Style::default().fg(theme.title),
        )));

        let cursor = form.option_cursor();
        let start = (cursor + 1).saturating_sub(MAX_OPTIONS);
        for (i, option) in form
            .options()
            .iter()
            .enumerate()
            .skip(start)
            .take(MAX_OPTIONS)
        {
            let text = truncate_to_width(&option.to_string(), input_width);
            let line = if i == cursor {
                Line::from(Span::styled(
                    format!("  ▸ {}", text),
                    Style::default().bg(theme.selection).fg(theme.selection_fg),
                ))
            } else {
                Line::from(Span::styled(
                    format!("    {}", text),
                    Style::default().fg(theme.foreground),
                ))
            };
            lines.push(line);
        }
    }

    let button = |key: &str, label: String| {
        vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(theme.highlight)),
            Span::styled(label, Style::default().fg(theme.foreground)),
            Span::raw("  "),
        ]
    };
    let mut buttons = button("Enter", APPLY_LABEL.to_string());
    buttons.extend(button("Ctrl+R", RESET_LABEL.to_string()));
    buttons.extend(button("F2", values_label(form.active_field())));
    lines.push(Line::from(buttons));

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(ComponentId::Filter)))
            .title(" Фильтр "),
    );
    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::tui::test_support::render_to_string;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut FilterForm, text: &str) {
        for c in text.chars() {
            handle_key(form, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_edits_the_active_field() {
        let mut form = FilterForm::new();
        type_text(&mut form, "Кольцо");
        assert_eq!(form.input(Field::Product), "Кольцо");

        handle_key(&mut form, key(KeyCode::Down));
        type_text(&mut form, "150");
        handle_key(&mut form, key(KeyCode::Backspace));
        assert_eq!(form.input(Field::Price), "15");

        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut form, ctrl_u), FilterCommand::Edited);
        assert_eq!(form.input(Field::Price), "");
    }

    #[test]
    fn enter_submits_and_f2_requests_values() {
        let mut form = FilterForm::new();
        form.focus(Field::Brand);
        assert_eq!(handle_key(&mut form, key(KeyCode::Enter)), FilterCommand::Submit);
        assert_eq!(
            handle_key(&mut form, key(KeyCode::F(2))),
            FilterCommand::RequestValues(Field::Brand)
        );
    }

    #[test]
    fn choosing_an_option_only_edits_the_draft() {
        let mut form = FilterForm::new();
        form.focus(Field::Brand);
        form.set_field_values(Field::Brand, &[json!("Acme"), json!(null), json!("Globex")]);

        handle_key(&mut form, key(KeyCode::Down));
        assert_eq!(handle_key(&mut form, key(KeyCode::Enter)), FilterCommand::Edited);
        assert_eq!(form.input(Field::Brand), "Globex");
        assert!(form.has_options());

        handle_key(&mut form, key(KeyCode::Esc));
        assert!(!form.has_options());
        assert_eq!(form.input(Field::Brand), "Globex");
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut form = FilterForm::new();
        assert_eq!(handle_key(&mut form, key(KeyCode::Tab)), FilterCommand::Ignored);
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut form, ctrl_r), FilterCommand::Ignored);
    }

    #[test]
    fn height_grows_with_options() {
        let mut form = FilterForm::new();
        assert_eq!(height(&form), 6);
        let values: Vec<_> = (0..10).map(|i| json!(format!("b{}", i))).collect();
        form.set_field_values(Field::Brand, &values);
        assert_eq!(height(&form), 6 + 1 + 6);
    }

    #[test]
    fn renders_inputs_options_and_buttons() {
        let mut form = FilterForm::new();
        form.set_input(Field::Product, "Кольцо");
        form.focus(Field::Brand);
        form.set_field_values(Field::Brand, &[json!("Piaget")]);

        let theme = Theme::default();
        let text = render_to_string(90, height(&form), |f| {
            let ctx = RenderContext::new(&theme, ComponentId::Filter, 0);
            render(f, f.area(), &form, &ctx);
        });

        assert!(text.contains("Кольцо"));
        assert!(text.contains("▸ Piaget"));
        assert!(text.contains(APPLY_LABEL));
        assert!(text.contains(RESET_LABEL));
        assert!(text.contains("Получить бренды"));
    }
}
