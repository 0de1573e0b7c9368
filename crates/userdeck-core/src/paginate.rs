// ── Paginator ──
//
// Fixed-size pages over the filtered view. `current_page` is 1-based and
// `go_to_page` is its only bounded write path; `reset` is the orchestrator's
// override when the view is replaced.

use std::ops::RangeInclusive;

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
}

impl Paginator {
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(len / page_size)`, never less than 1.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Records of `view` on `page`. Out-of-range pages yield an empty slice.
    pub fn slice<'a, T>(&self, view: &'a [T], page: usize) -> &'a [T] {
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.page_size).min(view.len());
        let end = start.saturating_add(self.page_size).min(view.len());
        &view[start..end]
    }

    /// Records of `view` on the current page.
    pub fn current_slice<'a, T>(&self, view: &'a [T]) -> &'a [T] {
        self.slice(view, self.current_page)
    }

    /// Move to `requested` if it is within `1..=page_count(len)`.
    /// Returns whether the page was accepted; out-of-range is a no-op.
    pub fn go_to_page(&mut self, requested: usize, len: usize) -> bool {
        if requested == 0 || requested > self.page_count(len) {
            return false;
        }
        self.current_page = requested;
        true
    }

    pub fn next_page(&mut self, len: usize) -> bool {
        self.go_to_page(self.current_page + 1, len)
    }

    pub fn previous_page(&mut self, len: usize) -> bool {
        self.go_to_page(self.current_page.saturating_sub(1), len)
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Page metadata for a view of `len` records.
    pub fn info(&self, len: usize) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.page_count(len),
            page_size: self.page_size,
            total_results: len,
        }
    }
}

// ── PageInfo ────────────────────────────────────────────────────────

/// Page/index metadata exposed to presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_results: usize,
}

impl PageInfo {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page navigation is only worth showing with more than one page.
    pub fn should_paginate(&self) -> bool {
        self.total_pages > 1
    }

    /// Every page number, for numbered navigation.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// 1-based inclusive positions of the current page's records within
    /// the view, or `None` when the page is empty.
    pub fn record_range(&self) -> Option<(usize, usize)> {
        if self.current_page == 0 {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        let last = (self.current_page * self.page_size).min(self.total_results);
        (first <= last).then_some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn page_count_has_a_floor_of_one() {
        let p = Paginator::new(9);
        assert_eq!(p.page_count(0), 1);
        assert_eq!(p.page_count(9), 1);
        assert_eq!(p.page_count(10), 2);
        assert_eq!(p.page_count(20), 3);
    }

    #[test]
    fn twenty_records_in_pages_of_nine() {
        let items = view(20);
        let mut p = Paginator::new(9);

        assert!(!p.go_to_page(0, items.len()));
        assert!(!p.go_to_page(4, items.len()));
        assert_eq!(p.current_page(), 1);

        assert!(p.go_to_page(3, items.len()));
        assert_eq!(p.current_slice(&items), &[19, 20]);
        assert_eq!(p.info(items.len()).record_range(), Some((19, 20)));
    }

    #[test]
    fn slice_never_panics_out_of_range() {
        let items = view(5);
        let p = Paginator::new(9);
        assert!(p.slice(&items, 0).is_empty());
        assert!(p.slice(&items, 2).is_empty());
        assert!(p.slice(&items, usize::MAX).is_empty());
        assert_eq!(p.slice(&items, 1), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let items: Vec<usize> = Vec::new();
        let mut p = Paginator::new(9);
        assert!(p.go_to_page(1, 0));
        assert!(p.current_slice(&items).is_empty());

        let info = p.info(0);
        assert_eq!(info.total_pages, 1);
        assert!(!info.should_paginate());
        assert_eq!(info.record_range(), None);
    }

    #[test]
    fn next_and_previous_are_bounded() {
        let mut p = Paginator::new(9);
        assert!(!p.previous_page(20));
        assert!(p.next_page(20));
        assert!(p.next_page(20));
        assert!(!p.next_page(20));
        assert_eq!(p.current_page(), 3);
        assert!(p.previous_page(20));
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn page_info_navigation_flags() {
        let mut p = Paginator::new(9);
        p.go_to_page(2, 20);
        let info = p.info(20);
        assert!(info.has_previous());
        assert!(info.has_next());
        assert!(info.should_paginate());
        assert_eq!(info.page_numbers().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let p = Paginator::new(0);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.page_count(3), 3);
    }

    #[test]
    fn record_range_of_page_zero_is_empty() {
        let info = PageInfo {
            current_page: 0,
            total_pages: 2,
            page_size: 9,
            total_results: 12,
        };
        assert_eq!(info.record_range(), None);
    }
}
