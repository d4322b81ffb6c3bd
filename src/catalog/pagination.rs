// Pagination state
//
// Pages are 1-based. `total_pages` is derived from the total matching count
// and may be 0 for an empty catalog; navigation is refused at the edges
// rather than clamped after the fact. A count that shrinks under the current
// page pulls it back to the last page.

/// Default number of identifiers per page
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Navigation intent emitted by the pagination display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageIntent {
    Prev,
    Next,
}

/// Current page plus the derived page count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u64,
    total_pages: u64,
    page_size: u64,
    /// Last known number of matching items
    total_count: Option<u64>,
}

impl Pagination {
    /// Start on page 1 of 1
    pub fn new(page_size: u64) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_size: page_size.max(1),
            total_count: None,
        }
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// None until the first count reply
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Offset of the first item on the current page
    pub fn offset(&self) -> u64 {
        (self.current_page - 1) * self.page_size
    }

    /// Number of pages needed for `count` items (ceiling division)
    pub fn pages_for(count: u64, page_size: u64) -> u64 {
        count.div_ceil(page_size.max(1))
    }

    /// Update the page count from a fresh total
    ///
    /// Keeps `current_page` within `1..=max(total_pages, 1)`.
    pub fn set_total_count(&mut self, count: u64) {
        self.total_pages = Self::pages_for(count, self.page_size);
        self.total_count = Some(count);
        self.current_page = self.current_page.min(self.total_pages.max(1));
    }

    /// "Previous" is available everywhere except page 1
    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    /// "Next" is available until the last page
    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Target page for an intent, if navigation is allowed
    pub fn target(&self, intent: PageIntent) -> Option<u64> {
        match intent {
            PageIntent::Prev if self.can_prev() => Some(self.current_page - 1),
            PageIntent::Next if self.can_next() => Some(self.current_page + 1),
            _ => None,
        }
    }

    /// Whether `page` is reachable from the current state
    pub fn is_valid_page(&self, page: u64) -> bool {
        page >= 1 && page <= self.total_pages.max(1)
    }

    /// Move to `page`; returns false (and changes nothing) if out of range
    pub fn go_to(&mut self, page: u64) -> bool {
        if !self.is_valid_page(page) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Back to page 1 (used when the filter changes)
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_for_is_ceiling() {
        assert_eq!(Pagination::pages_for(0, 50), 0);
        assert_eq!(Pagination::pages_for(1, 50), 1);
        assert_eq!(Pagination::pages_for(50, 50), 1);
        assert_eq!(Pagination::pages_for(51, 50), 2);
        assert_eq!(Pagination::pages_for(8004, 50), 161);
    }

    #[test]
    fn test_offset_follows_page() {
        let mut p = Pagination::default();
        p.set_total_count(500);
        assert_eq!(p.offset(), 0);
        assert!(p.go_to(3));
        assert_eq!(p.offset(), 100);
        assert_eq!(p.total_count(), Some(500));
    }

    #[test]
    fn test_prev_disabled_exactly_on_first_page() {
        let mut p = Pagination::default();
        p.set_total_count(150);
        assert!(!p.can_prev());
        assert_eq!(p.target(PageIntent::Prev), None);

        p.go_to(2);
        assert!(p.can_prev());
        assert_eq!(p.target(PageIntent::Prev), Some(1));
    }

    #[test]
    fn test_next_disabled_exactly_on_last_page() {
        let mut p = Pagination::default();
        p.set_total_count(150);
        assert!(p.can_next());
        p.go_to(2);
        assert!(p.can_next());
        p.go_to(3);
        assert!(!p.can_next());
        assert_eq!(p.target(PageIntent::Next), None);
    }

    #[test]
    fn test_empty_catalog_has_no_navigation() {
        let mut p = Pagination::default();
        p.set_total_count(0);
        assert_eq!(p.total_pages(), 0);
        assert!(!p.can_prev());
        assert!(!p.can_next());
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_shrinking_count_clamps_current_page() {
        let mut p = Pagination::default();
        p.set_total_count(300);
        assert!(p.go_to(5));

        p.set_total_count(120);
        assert_eq!(p.current_page(), 3);
        assert!(!p.can_next());
        assert!(p.can_prev());

        p.set_total_count(0);
        assert_eq!(p.current_page(), 1);
        assert!(!p.can_prev());

        // Growing again leaves the page alone
        p.set_total_count(500);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut p = Pagination::default();
        p.set_total_count(100);
        assert!(!p.go_to(0));
        assert!(!p.go_to(3));
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_zero_page_size_is_coerced() {
        let p = Pagination::new(0);
        assert_eq!(p.page_size(), 1);
    }
}
