//! Checkout endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use super::{place_order, CheckoutSummary, OrderConfirmation};
use crate::error::AppError;
use crate::state::SharedState;

/// Creates routes for the checkout view
pub fn routes() -> Router<SharedState> {
    Router::new().route("/checkout", get(summary).post(place))
}

/// Endpoint: GET /checkout
async fn summary(State(state): State<SharedState>) -> Json<CheckoutSummary> {
    let submitting = state.checkout.is_submitting();
    let cart = state.cart.lock().await;
    Json(CheckoutSummary::new(&cart, submitting))
}

/// Endpoint: POST /checkout
/// Responds after the simulated processing delay.
async fn place(State(state): State<SharedState>) -> Result<Json<OrderConfirmation>, AppError> {
    let delay = state.settings.checkout_delay;
    place_order(&state, delay).await.map(Json)
}
