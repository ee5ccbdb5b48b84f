//! Checkout Module
//!
//! Simulated order placement. Nothing is charged or recorded: placing an
//! order waits out a fixed processing delay and then empties the cart.

pub mod handlers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::cart::helpers::{format_item_summary, format_price};
use crate::cart::store::CartStore;
use crate::error::AppError;
use crate::state::AppState;
use crate::views::page_title;

pub use handlers::routes;

pub const ORDER_PLACED_HEADING: &str = "Order Placed!";
pub const ORDER_PLACED_MESSAGE: &str = "Thank you for your purchase.";

/// Disables order placement while one is in progress.
#[derive(Debug, Default)]
pub struct CheckoutGate {
    submitting: AtomicBool,
}

impl CheckoutGate {
    /// Claims the gate; `None` when an order is already being placed.
    pub fn try_begin(&self) -> Option<SubmissionGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionGuard { gate: self })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }
}

/// Re-enables placement when dropped, including on early return.
#[derive(Debug)]
pub struct SubmissionGuard<'a> {
    gate: &'a CheckoutGate,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.gate.submitting.store(false, Ordering::Release);
    }
}

/// One line of the checkout summary, e.g. `$9.99 x 2` for `$19.98`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutLine {
    pub id: u64,
    pub title: String,
    pub detail: String,
    pub line_total: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutSummary {
    pub title: String,
    pub lines: Vec<CheckoutLine>,
    pub total: String,
    pub submitting: bool,
    pub action_label: &'static str,
}

impl CheckoutSummary {
    pub fn new(cart: &CartStore, submitting: bool) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| CheckoutLine {
                id: item.id(),
                title: item.product.title.clone(),
                detail: format!("{} x {}", format_price(item.product.price), item.quantity),
                line_total: format_price(item.line_total()),
            })
            .collect();

        Self {
            title: page_title("Checkout"),
            lines,
            total: format_price(cart.total_price()),
            submitting,
            action_label: if submitting {
                "Placing Order..."
            } else {
                "Place Order"
            },
        }
    }
}

/// Shown once the simulated order has gone through.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderConfirmation {
    pub heading: &'static str,
    pub message: &'static str,
    pub items_ordered: u64,
}

/// Places the simulated order.
///
/// Holds the checkout gate for `delay`, then clears the cart and its
/// persisted copy. A second call while one is pending is refused.
pub async fn place_order(state: &AppState, delay: Duration) -> Result<OrderConfirmation, AppError> {
    let _guard = state
        .checkout
        .try_begin()
        .ok_or_else(|| AppError::Conflict("Order is already being placed".into()))?;

    info!(delay_ms = delay.as_millis() as u64, "placing order");
    tokio::time::sleep(delay).await;

    let mut cart = state.cart.lock().await;
    let items_ordered = cart.total_quantity();
    info!(items = %format_item_summary(cart.items()), "order placed");
    cart.clear();

    Ok(OrderConfirmation {
        heading: ORDER_PLACED_HEADING,
        message: ORDER_PLACED_MESSAGE,
        items_ordered,
    })
}
