//! Pagination state and page-range computation.
//!
//! [`Paginator`] tracks the current page of a result list; [`page_range`]
//! produces the numbered page bar (`1 … 4 5 6 … 12`) shown beneath it.
//!
//! # Example
//!
//! ```rust
//! use droplist::paginator::{PageItem, Paginator, page_range};
//!
//! let mut paginator = Paginator::new().per_page(10);
//! paginator.set_total_pages_from_items(95);
//! paginator.next_page();
//!
//! let items: Vec<_> = (1..=95).collect();
//! let (start, end) = paginator.slice_bounds(items.len());
//! assert_eq!(&items[start..end], &(11..=20).collect::<Vec<_>>()[..]);
//!
//! assert_eq!(
//!     page_range(1, 10, 1),
//!     vec![
//!         PageItem::Page(0),
//!         PageItem::Page(1),
//!         PageItem::Page(2),
//!         PageItem::Gap,
//!         PageItem::Page(9),
//!     ]
//! );
//! ```

use std::fmt;

/// Pagination model. Pages are 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
    total_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Creates a paginator with one item per page and one page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 0,
            per_page: 1,
            total_pages: 1,
        }
    }

    /// Sets the number of items per page (at least 1).
    #[must_use]
    pub fn per_page(mut self, n: usize) -> Self {
        self.per_page = n.max(1);
        self
    }

    /// Sets the total number of pages (at least 1).
    #[must_use]
    pub fn total_pages(mut self, n: usize) -> Self {
        self.total_pages = n.max(1);
        self
    }

    /// The current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Sets the current page, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.total_pages.saturating_sub(1));
    }

    /// Items per page.
    #[must_use]
    pub const fn get_per_page(&self) -> usize {
        self.per_page
    }

    /// Total number of pages.
    #[must_use]
    pub const fn get_total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recomputes the page count from an item count and clamps the current
    /// page. Zero items still yields one (empty) page. Returns the page count.
    pub fn set_total_pages_from_items(&mut self, items: usize) -> usize {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        self.set_page(self.page);
        self.total_pages
    }

    /// Start and end indices of the current page within `length` items.
    #[must_use]
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = (self.page * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Number of items on the current page.
    #[must_use]
    pub fn items_on_page(&self, total_items: usize) -> usize {
        let (start, end) = self.slice_bounds(total_items);
        end - start
    }

    /// Goes to the previous page, if any.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Goes to the next page, if any.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Whether the current page is the first.
    #[must_use]
    pub const fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Whether the current page is the last.
    #[must_use]
    pub const fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// The numbered page bar for the current page.
    #[must_use]
    pub fn range(&self, siblings: usize) -> Vec<PageItem> {
        page_range(self.page, self.total_pages, siblings)
    }

    /// Renders the page bar, bracketing the current page: `1 … [5] … 9`.
    #[must_use]
    pub fn view(&self, siblings: usize) -> String {
        self.range(siblings)
            .iter()
            .map(|item| match item {
                PageItem::Page(p) if *p == self.page => format!("[{item}]"),
                _ => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One slot of a page bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    /// A 0-indexed page.
    Page(usize),
    /// Elided pages.
    Gap,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(p) => write!(f, "{}", p + 1),
            Self::Gap => write!(f, "…"),
        }
    }
}

/// Computes a page bar.
///
/// The result always holds the first and last page, the current page and
/// up to `siblings` pages on each side of it. Runs of omitted pages become a
/// single [`PageItem::Gap`]; a gap never stands in for just one page, which
/// is shown instead. With `total` of zero the result is empty.
#[must_use]
pub fn page_range(current: usize, total: usize, siblings: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let last = total - 1;
    let current = current.min(last);

    // first + last + current + 2*siblings + 2 gaps
    let slots = siblings.saturating_mul(2).saturating_add(5);
    if total <= slots {
        return (0..total).map(PageItem::Page).collect();
    }

    let mut lo = current.saturating_sub(siblings).max(1);
    let mut hi = current.saturating_add(siblings).min(last - 1);

    // A gap replacing a single page is no shorter than the page itself.
    if lo == 2 {
        lo = 1;
    }
    if hi + 2 == last {
        hi = last - 1;
    }

    let mut items = Vec::with_capacity(slots);
    items.push(PageItem::Page(0));
    if lo > 1 {
        items.push(PageItem::Gap);
    }
    items.extend((lo..=hi).map(PageItem::Page));
    if hi < last - 1 {
        items.push(PageItem::Gap);
    }
    items.push(PageItem::Page(last));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn test_paginator_navigation() {
        let mut p = Paginator::new().total_pages(5);
        assert!(p.on_first_page());

        for _ in 0..10 {
            p.next_page();
        }
        assert_eq!(p.page(), 4);
        assert!(p.on_last_page());

        p.prev_page();
        assert_eq!(p.page(), 3);
        p.set_page(0);
        p.prev_page();
        assert_eq!(p.page(), 0);
    }

    #[test]
    fn test_slice_bounds() {
        let mut p = Paginator::new().per_page(3);
        p.set_total_pages_from_items(10);
        assert_eq!(p.get_total_pages(), 4);

        assert_eq!(p.slice_bounds(10), (0, 3));
        p.set_page(3);
        assert_eq!(p.slice_bounds(10), (9, 10));
        assert_eq!(p.items_on_page(10), 1);
    }

    #[test]
    fn test_shrinking_item_count_clamps_page() {
        let mut p = Paginator::new().per_page(10);
        p.set_total_pages_from_items(50);
        p.set_page(4);
        p.set_total_pages_from_items(12);
        assert_eq!(p.page(), 1);

        p.set_total_pages_from_items(0);
        assert_eq!(p.get_total_pages(), 1);
        assert_eq!(p.page(), 0);
        assert_eq!(p.items_on_page(0), 0);
    }

    #[test]
    fn test_page_range_small_totals_have_no_gaps() {
        assert_eq!(page_range(0, 0, 1), vec![]);
        assert_eq!(page_range(0, 1, 1), vec![Page(0)]);
        assert_eq!(
            page_range(3, 7, 1),
            (0..7).map(Page).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_page_range_gaps() {
        assert_eq!(
            page_range(0, 10, 1),
            vec![Page(0), Page(1), Gap, Page(9)]
        );
        assert_eq!(
            page_range(5, 10, 1),
            vec![Page(0), Gap, Page(4), Page(5), Page(6), Gap, Page(9)]
        );
        assert_eq!(
            page_range(9, 10, 1),
            vec![Page(0), Gap, Page(8), Page(9)]
        );
    }

    #[test]
    fn test_page_range_never_elides_a_single_page() {
        assert_eq!(
            page_range(3, 10, 1),
            vec![Page(0), Page(1), Page(2), Page(3), Page(4), Gap, Page(9)]
        );
        assert_eq!(
            page_range(6, 10, 1),
            vec![Page(0), Gap, Page(5), Page(6), Page(7), Page(8), Page(9)]
        );
    }

    #[test]
    fn test_page_range_clamps_current() {
        assert_eq!(page_range(99, 3, 1), vec![Page(0), Page(1), Page(2)]);
    }

    #[test]
    fn test_view() {
        let mut p = Paginator::new().total_pages(10);
        p.set_page(5);
        assert_eq!(p.view(1), "1 … 5 [6] 7 … 10");
        p.set_page(0);
        assert_eq!(p.view(1), "[1] 2 … 10");
    }
}
