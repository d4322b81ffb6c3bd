//! Scrollable and Selectable traits
//!
//! Components own their `ScrollState` and expose it here to get uniform
//! scroll and selection behavior.

use super::Component;
use crate::tui::scroll::ScrollState;

/// Trait for components with scrollable content
pub trait Scrollable: Component {
    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }
}

/// A cursor over the items of a scrollable component
///
/// Selection keeps the selected item inside the viewport.
pub trait Selectable: Scrollable {
    fn selected_index(&self) -> Option<usize>;

    /// Set the selection (implementations clamp to `item_count`)
    fn select(&mut self, index: usize);

    fn item_count(&self) -> usize;

    /// Select the next item (first item when nothing is selected)
    fn select_next(&mut self) {
        let next = match self.selected_index() {
            Some(current) => (current + 1).min(self.item_count().saturating_sub(1)),
            None => 0,
        };
        if self.item_count() > 0 {
            self.select(next);
            self.scroll_state_mut().ensure_visible(next);
        }
    }

    /// Select the previous item (last item when nothing is selected)
    fn select_previous(&mut self) {
        let prev = match self.selected_index() {
            Some(current) => current.saturating_sub(1),
            None => self.item_count().saturating_sub(1),
        };
        if self.item_count() > 0 {
            self.select(prev);
            self.scroll_state_mut().ensure_visible(prev);
        }
    }
}
