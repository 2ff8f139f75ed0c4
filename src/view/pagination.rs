/// Number of pages needed for `total_messages`, never less than one
pub fn total_pages_for(total_messages: usize, page_size: usize) -> usize {
    total_messages.div_ceil(page_size.max(1)).max(1)
}

/// Two-way mapping between internal chunk indices and display page numbers.
///
/// Internal index 0 is the oldest chunk; display page 1 is the newest:
/// `display = total_pages - index`. Moving to newer content ("prev")
/// increases the internal index, moving to older content ("next") decreases it.
/// Requests past either end are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationIndex {
    total_pages: usize,
    current: usize,
}

impl PaginationIndex {
    /// Start at the most recent page
    pub fn new(total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        Self { total_pages, current: total_pages - 1 }
    }

    pub fn from_message_count(total_messages: usize, page_size: usize) -> Self {
        Self::new(total_pages_for(total_messages, page_size))
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Internal index of the page being shown
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn newest_index(&self) -> usize {
        self.total_pages - 1
    }

    pub fn display_page(&self) -> usize {
        self.to_display(self.current)
    }

    pub fn to_display(&self, index: usize) -> usize {
        self.total_pages - index
    }

    /// Internal index for a 1-based display page, or `None` when out of range
    pub fn to_internal(&self, display_page: usize) -> Option<usize> {
        (1..=self.total_pages).contains(&display_page).then(|| self.total_pages - display_page)
    }

    /// "prev" control: enabled unless already on the newest page
    pub fn can_go_newer(&self) -> bool {
        self.current < self.newest_index()
    }

    /// "next" control: enabled unless already on the oldest page
    pub fn can_go_older(&self) -> bool {
        self.current > 0
    }

    /// Index one step newer than `from`, if any
    pub fn newer_than(&self, from: usize) -> Option<usize> {
        (from < self.newest_index()).then(|| from + 1)
    }

    /// Index one step older than `from`, if any
    pub fn older_than(&self, from: usize) -> Option<usize> {
        from.checked_sub(1).filter(|i| *i < self.total_pages)
    }

    /// Move to `index`; out-of-range indices leave the position unchanged
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.total_pages {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// "Page D / N"
    pub fn label(&self) -> String {
        format!("Page {} / {}", self.display_page(), self.total_pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_for() {
        assert_eq!(total_pages_for(0, 100), 1);
        assert_eq!(total_pages_for(1, 100), 1);
        assert_eq!(total_pages_for(100, 100), 1);
        assert_eq!(total_pages_for(101, 100), 2);
        assert_eq!(total_pages_for(250, 100), 3);
        assert_eq!(total_pages_for(7, 0), 7);
    }

    #[test]
    fn test_display_plus_internal_equals_total() {
        for n in [0usize, 1, 99, 100, 101, 250, 1000, 1001] {
            for size in [1usize, 7, 100] {
                let mut idx = PaginationIndex::from_message_count(n, size);
                let total = idx.total_pages();
                assert_eq!(total, n.div_ceil(size).max(1));
                for internal in 0..total {
                    assert!(idx.set_current(internal));
                    assert_eq!(idx.display_page() + idx.current(), total);
                    assert_eq!(idx.to_internal(idx.display_page()), Some(internal));
                }
            }
        }
    }

    #[test]
    fn test_250_messages_opens_on_page_1_of_3() {
        let idx = PaginationIndex::from_message_count(250, 100);
        assert_eq!(idx.total_pages(), 3);
        assert_eq!(idx.current(), 2);
        assert_eq!(idx.label(), "Page 1 / 3");
    }

    #[test]
    fn test_boundaries_disable_controls() {
        let mut idx = PaginationIndex::new(3);
        assert!(!idx.can_go_newer());
        assert!(idx.can_go_older());

        idx.set_current(0);
        assert!(idx.can_go_newer());
        assert!(!idx.can_go_older());
    }

    #[test]
    fn test_single_page_has_no_navigation() {
        let idx = PaginationIndex::new(1);
        assert!(!idx.can_go_newer());
        assert!(!idx.can_go_older());
        assert_eq!(idx.newer_than(0), None);
        assert_eq!(idx.older_than(0), None);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut idx = PaginationIndex::new(3);
        assert!(!idx.set_current(3));
        assert_eq!(idx.current(), 2);
        assert_eq!(idx.newer_than(2), None);
        assert_eq!(idx.older_than(0), None);
        assert_eq!(idx.to_internal(0), None);
        assert_eq!(idx.to_internal(4), None);
    }

    #[test]
    fn test_step_targets() {
        let idx = PaginationIndex::new(3);
        assert_eq!(idx.older_than(2), Some(1));
        assert_eq!(idx.newer_than(1), Some(2));
    }
}
