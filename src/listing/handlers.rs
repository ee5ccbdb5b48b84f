//! Shop listing endpoints
//!
//! `GET /shop` renders the listing for the query in the URL and records it
//! in the shopper's [`ListingView`](super::ListingView), so a slow response
//! for an abandoned query never replaces a newer one.

use std::num::NonZeroU32;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::pagination::Pagination;
use super::query::{Category, ListingQuery, RawListingParams};
use super::render::{category_entries, CategoryEntry, ShopListing};
use super::view::Completion;
use crate::catalog::{PageRequest, Product};
use crate::error::AppError;
use crate::session::{attach_session, resolve_session_id};
use crate::state::{AppState, SharedState};
use crate::views::page_title;

/// Creates routes for the listing views
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/shop", get(shop))
        .route("/shop/current", get(current_listing))
        .route("/shop/categories", get(categories))
        .route("/search", get(search))
}

#[derive(Serialize)]
struct ListingResponse {
    #[serde(flatten)]
    listing: ShopListing,

    /// A newer listing request was issued while this one was in flight
    stale: bool,
}

/// Endpoint: GET /shop?category=&page=&sort=
async fn shop(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<RawListingParams>,
) -> Response {
    let (session_id, is_new) = resolve_session_id(&headers);
    let query = ListingQuery::from_params(&params);

    let ticket = state.begin_listing(&session_id, query.clone());

    let listing = load_listing(&state, &query).await;

    let completion = match state.listings.get_mut(&session_id) {
        Some(mut view) => view.complete(ticket, listing.clone()),
        None => Completion::Superseded,
    };

    let body = ListingResponse {
        listing,
        stale: completion == Completion::Superseded,
    };
    attach_session(Json(body).into_response(), &session_id, is_new)
}

#[derive(Serialize)]
struct CurrentListing {
    /// A fetch for the shopper's latest query has not finished yet
    loading: bool,

    /// Absent while the very first fetch is still loading
    #[serde(flatten)]
    listing: Option<ShopListing>,
}

/// Endpoint: GET /shop/current
/// The shopper's most recent listing that was still current when it arrived.
async fn current_listing(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<CurrentListing>, AppError> {
    let (session_id, _) = resolve_session_id(&headers);
    let view = state
        .listings
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound("No listing loaded yet".into()))?;

    Ok(Json(CurrentListing {
        loading: view.is_loading(),
        listing: view.current().cloned(),
    }))
}

/// Fetches and renders one listing page; failures render as an empty grid
/// with the error and a retry link.
pub async fn load_listing(state: &AppState, query: &ListingQuery) -> ShopListing {
    let limit = state.settings.page_size;
    let request = PageRequest::new(limit, query.skip(limit)).sorted(query.sort);

    let result = match &query.category {
        Category::All => state.catalog.fetch_products(request).await,
        Category::Named(category) => {
            state
                .catalog
                .fetch_products_by_category(category, request)
                .await
        }
    };

    match result {
        Ok(page) => {
            info!(
                category = query.category.as_str(),
                page = query.page.get(),
                total = page.total,
                "listing loaded"
            );
            ShopListing::from_page(query, page, limit)
        }
        Err(err) => {
            warn!(category = query.category.as_str(), error = %err, "listing failed");
            ShopListing::failed(query, err.user_message(), limit)
        }
    }
}

#[derive(Serialize)]
struct CategoriesResponse {
    categories: Vec<CategoryEntry>,
}

/// Endpoint: GET /shop/categories
/// Degrades to the "All Categories" entry alone when the catalog fails.
async fn categories(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Json<CategoriesResponse> {
    let (session_id, _) = resolve_session_id(&headers);
    let current = state
        .listings
        .get(&session_id)
        .map(|view| view.query().clone())
        .unwrap_or_default();

    let slugs = state.catalog.fetch_categories().await.unwrap_or_else(|err| {
        warn!(error = %err, "failed to fetch categories");
        Vec::new()
    });

    Json(CategoriesResponse {
        categories: category_entries(&slugs, &current),
    })
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    page: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    title: String,
    query: String,
    products: Vec<Product>,
    total: u64,
    pagination: Pagination,
}

/// Endpoint: GET /search?q=&page=
async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, AppError> {
    let page = params
        .page
        .as_deref()
        .and_then(|page| page.trim().parse::<NonZeroU32>().ok())
        .unwrap_or(NonZeroU32::MIN);
    let limit = state.settings.page_size;
    let skip = u64::from(page.get() - 1).saturating_mul(limit);

    let results = state.catalog.search_products(&params.q, limit, skip).await?;

    Ok(Json(SearchResults {
        title: page_title("Search"),
        query: params.q.trim().to_string(),
        pagination: Pagination::new(u64::from(page.get()), results.total, limit, results.skip),
        total: results.total,
        products: results.products,
    }))
}
