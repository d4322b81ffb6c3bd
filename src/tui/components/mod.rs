// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Title bar: App name, loading spinner, active filter
// - Status bar: Uptime, loaded cards, total matches, page, key hint
// - Pagination bar: Page indicator with previous/next affordances
//
// Panels own their scroll and selection state:
// - Product list: One card per id on the current page
// - Filter panel: Draft inputs, value options, buttons
// - Logs panel: Captured log entries

pub mod filter_panel;
pub mod formatters;
pub mod logs_panel;
pub mod pagination_bar;
pub mod product_list;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
