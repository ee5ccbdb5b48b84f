//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for viewing and editing the cart.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::models::UpdateQuantityInput;
use super::view::{CartMutation, CartView};
use crate::catalog::Product;
use crate::error::AppError;
use crate::state::SharedState;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(view_cart))
        .route("/cart/items", post(add_item))
        .route(
            "/cart/items/:id",
            get(membership).patch(update_item).delete(remove_item),
        )
}

/// Endpoint: GET /cart
async fn view_cart(State(state): State<SharedState>) -> Json<CartView> {
    let cart = state.cart.lock().await;
    Json(CartView::from_store(&cart))
}

/// Endpoint: POST /cart/items
/// Adds one unit of the posted product.
/// Products with a zero id or a negative price are refused.
async fn add_item(
    State(state): State<SharedState>,
    Json(product): Json<Product>,
) -> Result<Json<CartMutation>, AppError> {
    product.validate()?;

    let mut cart = state.cart.lock().await;
    let id = product.id;
    let notice = cart.add_to_cart(product);
    info!(id, notice = notice.message(), "cart updated");
    Ok(Json(CartMutation::new(notice, &cart)))
}

/// Endpoint: GET /cart/items/{id}
async fn membership(State(state): State<SharedState>, Path(id): Path<u64>) -> Json<Value> {
    let cart = state.cart.lock().await;
    Json(json!({ "id": id, "in_cart": cart.is_in_cart(id) }))
}

/// Endpoint: PATCH /cart/items/{id}
/// Quantities below 1 are stored as 1.
async fn update_item(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateQuantityInput>,
) -> Result<Json<CartMutation>, AppError> {
    let mut cart = state.cart.lock().await;
    let notice = cart
        .update_quantity(id, input.quantity)
        .ok_or_else(|| AppError::NotFound(format!("Product {id} is not in the cart")))?;
    info!(id, quantity = input.quantity, "cart quantity updated");
    Ok(Json(CartMutation::new(notice, &cart)))
}

/// Endpoint: DELETE /cart/items/{id}
/// Removing an id that is not in the cart succeeds and changes nothing.
async fn remove_item(State(state): State<SharedState>, Path(id): Path<u64>) -> Json<CartMutation> {
    let mut cart = state.cart.lock().await;
    let notice = cart.remove_from_cart(id);
    info!(id, "removed from cart");
    Json(CartMutation::new(notice, &cart))
}
