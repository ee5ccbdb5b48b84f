//! Catalog Listing Module
//!
//! This module contains the shop listing view, including:
//! - Query state (category, page, sort) and its URL encoding
//! - Pagination model
//! - Per-shopper view state with stale-response protection
//! - REST API handlers

pub mod handlers;
pub mod pagination;
pub mod query;
pub mod render;
pub mod view;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use pagination::{total_pages, Pagination};
pub use query::{Category, ListingQuery, RawListingParams, Sort, SortField, SortOrder};
pub use render::ShopListing;
pub use view::{Completion, ListingView, RequestTicket};
