//! Per-shopper listing view state.
//!
//! Overlapping fetches for one view may complete out of order. Each fetch is
//! tagged with a ticket; only the most recently issued ticket may update the
//! view, so a slow earlier response can never overwrite a later one.

use serde::Serialize;

use super::query::ListingQuery;

/// Identifies one fetch issued by a [`ListingView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Outcome of handing a finished fetch back to its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    Applied,
    /// A newer fetch was issued meanwhile; the result was discarded
    Superseded,
}

/// Listing state for one shopper.
#[derive(Debug, Clone)]
pub struct ListingView<T> {
    latest: u64,
    query: ListingQuery,
    loading: bool,
    current: Option<T>,
    last_active: u64,
}

impl<T> Default for ListingView<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            query: ListingQuery::default(),
            loading: false,
            current: None,
            last_active: 0,
        }
    }
}

impl<T> ListingView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new fetch for `query` and returns its ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin(&mut self, query: ListingQuery) -> RequestTicket {
        self.latest += 1;
        self.query = query;
        self.loading = true;
        RequestTicket(self.latest)
    }

    /// Applies `result` if `ticket` is still the latest one issued.
    pub fn complete(&mut self, ticket: RequestTicket, result: T) -> Completion {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding superseded listing response"
            );
            return Completion::Superseded;
        }
        self.loading = false;
        self.current = Some(result);
        Completion::Applied
    }

    /// Stamps the view with the owner's latest activity.
    pub fn mark_active(&mut self, stamp: u64) {
        self.last_active = stamp;
    }

    pub fn last_active(&self) -> u64 {
        self.last_active
    }

    /// Query of the most recently issued fetch.
    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Result of the latest fetch that completed while it was still current.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;

    #[test]
    fn latest_response_is_applied() {
        let mut view = ListingView::new();
        let ticket = view.begin(ListingQuery::default());
        assert!(view.is_loading());

        assert_eq!(view.complete(ticket, "page 1"), Completion::Applied);
        assert_eq!(view.current(), Some(&"page 1"));
        assert!(!view.is_loading());
    }

    #[test]
    fn slow_earlier_response_is_discarded() {
        let mut view = ListingView::new();
        let first = view.begin(ListingQuery::default());
        let second = view.begin(ListingQuery::default().with_page(NonZeroU32::new(2).unwrap()));

        assert_eq!(view.complete(second, "page 2"), Completion::Applied);
        assert_eq!(view.complete(first, "page 1"), Completion::Superseded);
        assert_eq!(view.current(), Some(&"page 2"));
        assert_eq!(view.query().page.get(), 2);
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut view = ListingView::new();
        let first = view.begin(ListingQuery::default());
        let second = view.begin(ListingQuery::default());

        assert_eq!(view.complete(first, 1), Completion::Superseded);
        assert!(view.is_loading());
        assert!(view.current().is_none());

        assert_eq!(view.complete(second, 2), Completion::Applied);
        assert!(!view.is_loading());
    }

    #[test]
    fn tickets_increase_monotonically() {
        let mut view: ListingView<()> = ListingView::new();
        let a = view.begin(ListingQuery::default());
        let b = view.begin(ListingQuery::default());
        let c = view.begin(ListingQuery::default());
        assert!(a < b && b < c);
    }
}
