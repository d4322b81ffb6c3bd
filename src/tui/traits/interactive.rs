//! Interactive trait for components that handle keyboard input
//!
//! The App routes input to the focused component; unhandled keys bubble up.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global: Ctrl+C, Ctrl+R, Tab; then q, r, l, / outside the form)
///    │  if not handled
///    ▼
/// Focused component  ──► Handled::Yes / Handled::No
///    │  if not handled (product list or logs)
///    ▼
/// Pagination bar
/// ```
pub trait Interactive: Component {
    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints shown in the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
