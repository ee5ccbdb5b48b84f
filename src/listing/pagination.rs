//! Pagination model for the listing views.

use serde::Serialize;

/// Page numbers shown at once around the current page.
pub const MAX_VISIBLE_PAGES: u64 = 3;

/// `ceil(total / limit)`; zero when there is nothing to page.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Pagination controls derived from a listing response.
///
/// The numbered window stays within `1..=total_pages`. Previous and next
/// are relative to the requested page, so a page past the end still offers
/// its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,

    /// Hidden when everything fits on one page
    pub visible: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,

    /// Window of page numbers to render
    pub pages: Vec<u64>,

    /// e.g. "Showing 21-40 of 194 products"
    pub summary: String,
}

impl Pagination {
    pub fn new(current_page: u64, total: u64, limit: u64, skip: u64) -> Self {
        let total_pages = total_pages(total, limit);

        let half = MAX_VISIBLE_PAGES / 2;
        let mut start = current_page.saturating_sub(half).max(1);
        let end = total_pages.min(start.saturating_add(MAX_VISIBLE_PAGES - 1));
        if end.saturating_add(1) < start.saturating_add(MAX_VISIBLE_PAGES) {
            start = end.saturating_add(1).saturating_sub(MAX_VISIBLE_PAGES).max(1);
        }
        let pages = (start..=end).collect();

        // `skip` and `total` come straight from the catalog.
        let first_item = skip.saturating_add(1).min(total);
        let last_item = skip.saturating_add(limit).min(total);

        Self {
            current_page,
            total_pages,
            visible: total_pages > 1,
            previous: (current_page > 1).then(|| current_page - 1),
            next: (current_page < total_pages).then(|| current_page + 1),
            pages,
            summary: format!("Showing {first_item}-{last_item} of {total} products"),
        }
    }
}
