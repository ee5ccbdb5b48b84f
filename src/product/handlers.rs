//! Product detail endpoints

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use super::view::{CartAction, ProductDetail};
use crate::cart::view::CartMutation;
use crate::error::AppError;
use crate::state::SharedState;

/// Creates routes for the product detail view
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products/:id", get(product_detail))
        .route("/products/:id/toggle", post(toggle_in_cart))
}

fn parse_product_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("Product ID is missing".into()))
}

/// Endpoint: GET /products/{id}
async fn product_detail(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductDetail>, AppError> {
    let id = parse_product_id(&raw_id)?;
    let product = state.catalog.fetch_product(id).await?;
    let in_cart = state.cart.lock().await.is_in_cart(id);
    Ok(Json(ProductDetail::new(product, in_cart)))
}

/// Endpoint: POST /products/{id}/toggle
/// Removes the product when it is in the cart, otherwise adds it.
async fn toggle_in_cart(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CartMutation>, AppError> {
    let id = parse_product_id(&raw_id)?;
    let product = state.catalog.fetch_product(id).await?;

    let mut cart = state.cart.lock().await;
    let notice = match CartAction::for_product(&product, cart.is_in_cart(id)) {
        CartAction::OutOfStock => {
            return Err(AppError::Conflict(CartAction::OutOfStock.label().into()));
        }
        CartAction::Remove => cart.remove_from_cart(id),
        CartAction::Add => cart.add_to_cart(product),
    };
    info!(id, notice = notice.message(), "cart toggled from product page");

    Ok(Json(CartMutation::new(notice, &cart)))
}
