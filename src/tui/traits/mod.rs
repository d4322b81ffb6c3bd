//! Component trait system for the TUI
//!
//! Panels declare their own capabilities through traits instead of App
//! knowing how to render, scroll and handle keys for each one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                            App                              │
//! │     (owns CatalogController, routes keys, applies replies)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!        ┌──────────────┬──────┴───────┬──────────────┐
//!        ▼              ▼              ▼              ▼
//!   ┌──────────┐  ┌──────────┐  ┌────────────┐  ┌──────────┐
//!   │ Products │  │  Filter  │  │ Pagination │  │   Logs   │
//!   └──────────┘  └──────────┘  └────────────┘  └──────────┘
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] - scrollable content
//! - [`Selectable`] - a cursor over scrollable items
//! - [`Interactive`] - keyboard input

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive};
pub use scrollable::{Scrollable, Selectable};
