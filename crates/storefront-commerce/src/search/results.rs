//! Pagination math and the visible window over filtered results.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of pages needed for `total` items; zero items means zero pages.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_pages(total, per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.per_page).min(self.total)
    }
}

/// Which part of the filtered results is visible.
///
/// Both modes resolve to one contiguous range, so the visible list is always a
/// slice of the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Window {
    /// Page-jump access: exactly one page.
    Page { page: usize },
    /// Incremental access: from the page's offset up to `end`, grown batch by batch.
    Scroll { page: usize, end: usize },
}

impl Window {
    /// The initial window: page 1.
    pub const FIRST_PAGE: Window = Window::Page { page: 1 };

    pub fn page(&self) -> usize {
        match *self {
            Window::Page { page } | Window::Scroll { page, .. } => page,
        }
    }

    pub fn is_scroll(&self) -> bool {
        matches!(self, Window::Scroll { .. })
    }

    /// Resolve to an index range over `len` filtered items. Pages past the end
    /// resolve to an empty range.
    pub fn range(&self, len: usize, per_page: usize) -> Range<usize> {
        let per_page = per_page.max(1);
        let start = self
            .page()
            .saturating_sub(1)
            .saturating_mul(per_page)
            .min(len);
        let end = match *self {
            Window::Page { page } => page.saturating_mul(per_page),
            Window::Scroll { end, .. } => end,
        };
        start..end.clamp(start, len)
    }

    /// Borrow the visible slice.
    pub fn slice<'a, T>(&self, items: &'a [T], per_page: usize) -> &'a [T] {
        &items[self.range(items.len(), per_page)]
    }

    /// Window after appending one batch, or `None` when nothing is left to load.
    pub fn grow(&self, len: usize, per_page: usize, batch: usize) -> Option<Window> {
        let current = self.range(len, per_page);
        if current.end >= len {
            return None;
        }
        Some(Window::Scroll {
            page: self.page(),
            end: current.end.saturating_add(batch.max(1)).min(len),
        })
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::FIRST_PAGE
    }
}
