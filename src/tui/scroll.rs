// Scroll state shared by list panels
//
// Each panel owns one ScrollState; App only routes input and renders.
// Two modes: auto-follow (logs, keeps the newest entry visible) and manual
// (product list, keeps the selection visible).

/// Scroll state for a single panel
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Index of the first visible item
    offset: usize,

    /// Total number of items
    total: usize,

    /// Number of items visible in the viewport
    viewport: usize,

    /// Keep the view pinned to the bottom as content grows
    /// Scrolling up disables it; reaching the bottom re-enables it
    pub auto_follow: bool,

    /// Whether reaching the bottom may re-enable auto-follow
    follows: bool,
}

impl ScrollState {
    /// Scroll state that follows new content
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
            follows: true,
        }
    }

    /// Scroll state that stays where the user put it
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            follows: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions (call each frame)
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.viewport.max(1));
        self.auto_follow = false;
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.viewport.max(1)).min(self.max_offset());
        if self.follows && self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = self.follows;
    }

    /// Move the window just enough for `index` to be visible
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible range as (start, end) item indices
    pub fn visible_range(&self) -> (usize, usize) {
        let end = (self.offset + self.viewport).min(self.total);
        (self.offset.min(end), end)
    }

    /// Number of positions the window can move through
    pub fn scroll_span(&self) -> usize {
        self.max_offset()
    }

    /// Content overflows the viewport
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_growing_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn page_up_stops_following_until_bottom() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.page_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 10);

        scroll.page_down();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn manual_mode_stays_put() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 5);
        assert!(!scroll.auto_follow);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 5);
    }

    #[test]
    fn ensure_visible_moves_minimally() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);

        scroll.ensure_visible(3);
        assert_eq!(scroll.visible_range(), (0, 10));

        scroll.ensure_visible(12);
        assert_eq!(scroll.visible_range(), (3, 13));

        scroll.ensure_visible(1);
        assert_eq!(scroll.visible_range(), (1, 11));
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);
        scroll.ensure_visible(49);
        assert_eq!(scroll.offset(), 40);

        scroll.update_dimensions(4, 10);
        assert_eq!(scroll.visible_range(), (0, 4));
        assert!(!scroll.needs_scrollbar());
    }
}
