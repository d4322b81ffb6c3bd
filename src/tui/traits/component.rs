//! Core component trait
//!
//! Every UI element that can be rendered implements `Component`.

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identifier for a component, also used for focus tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Product cards of the current page (default focus)
    #[default]
    Products,
    /// Filter inputs and value selection
    Filter,
    /// System logs panel
    Logs,
    /// Page indicator with previous/next (never focused; fed unhandled keys)
    Pagination,
}

impl ComponentId {
    /// Focus cycle order for Tab
    const FOCUS_ORDER: [ComponentId; 3] =
        [ComponentId::Products, ComponentId::Filter, ComponentId::Logs];

    /// Next focusable component (Tab)
    ///
    /// `logs_visible` removes the logs panel from the cycle when hidden.
    pub fn next_focus(self, logs_visible: bool) -> Self {
        self.step(true, logs_visible)
    }

    /// Previous focusable component (Shift+Tab)
    pub fn prev_focus(self, logs_visible: bool) -> Self {
        self.step(false, logs_visible)
    }

    fn step(self, forward: bool, logs_visible: bool) -> Self {
        let order: Vec<ComponentId> = Self::FOCUS_ORDER
            .into_iter()
            .filter(|id| logs_visible || *id != ComponentId::Logs)
            .collect();
        let Some(pos) = order.iter().position(|id| *id == self) else {
            return ComponentId::Products;
        };
        let by = if forward { 1 } else { order.len() - 1 };
        order[(pos + by) % order.len()]
    }
}

/// Immutable context passed to components during rendering
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (spinners)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId, animation_frame: usize) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
        }
    }

    /// Check if a component is currently focused
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Spinner character for the current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Border color for a panel, identity color when focused
    pub fn border_color(&self, id: ComponentId) -> ratatui::style::Color {
        self.theme.panel_border(id, self.is_focused(id))
    }
}

/// Base trait for all UI components
///
/// Components that need data they do not own are synced before render
/// (see `ProductListPanel::sync`).
pub trait Component {
    /// Identifier for focus and theming
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_visible_panels() {
        let id = ComponentId::Products;
        assert_eq!(id.next_focus(true), ComponentId::Filter);
        assert_eq!(id.next_focus(true).next_focus(true), ComponentId::Logs);
        assert_eq!(ComponentId::Logs.next_focus(true), ComponentId::Products);
        assert_eq!(id.prev_focus(true), ComponentId::Logs);
    }

    #[test]
    fn hidden_logs_are_skipped() {
        assert_eq!(ComponentId::Filter.next_focus(false), ComponentId::Products);
        assert_eq!(ComponentId::Products.prev_focus(false), ComponentId::Filter);
        // Focus stranded on hidden logs returns home
        assert_eq!(ComponentId::Logs.next_focus(false), ComponentId::Products);
    }

    #[test]
    fn pagination_is_not_in_the_cycle() {
        // Unknown position falls back to the product list
        assert_eq!(ComponentId::Pagination.next_focus(true), ComponentId::Products);
    }
}
