use serde::{Deserialize, Serialize};

/// Default number of items per catalog page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 24;

/// Default number of page buttons shown at once.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Requested page of a result set (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub const fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_ITEMS_PER_PAGE)
    }
}

/// Page actually served after clamping a request against the result count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Resolved page, always within `1..=page_count`.
    pub page: usize,
    /// At least one, even for an empty result set.
    pub page_count: usize,
    pub offset: usize,
    pub page_size: usize,
}

impl PageWindow {
    /// Copies this page's slice out of a fully materialized result set.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset)
            .take(self.page_size)
            .cloned()
            .collect()
    }
}

/// Resolves a requested page against `total` results.
///
/// Out-of-range requests are clamped, never rejected. A zero page size is
/// treated as one.
pub fn paginate(total: usize, page_size: usize, requested_page: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let page_count = total.div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, page_count);

    PageWindow {
        page,
        page_count,
        offset: (page - 1) * page_size,
        page_size,
    }
}

/// Contiguous run of at most `window_size` page numbers around `page`.
///
/// The run is centred on `page` where possible and shifted back inside
/// `1..=page_count` near either end.
pub fn visible_window(page: usize, page_count: usize, window_size: usize) -> Vec<usize> {
    if window_size == 0 {
        return Vec::new();
    }

    let page_count = page_count.max(1);
    let page = page.clamp(1, page_count);

    let start = page.saturating_sub(window_size / 2).max(1);
    let end = start.saturating_add(window_size - 1).min(page_count);
    let start = end.saturating_sub(window_size - 1).max(1);

    (start..=end).collect()
}

/// One rendered page of results with the data its controls need.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Number of matching items across all pages.
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
    /// Page buttons to show.
    pub pages: Vec<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: usize, window: PageWindow, window_size: usize) -> Self {
        Self {
            items,
            total,
            page: window.page,
            page_count: window.page_count,
            pages: visible_window(window.page, window.page_count, window_size),
        }
    }

    /// True for the explicit "no results" state.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}
