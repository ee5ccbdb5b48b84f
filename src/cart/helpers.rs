//! Shopping Cart Business Logic Helpers
//!
//! This module contains helper functions for cart formatting.

use rust_decimal::Decimal;

use super::models::CartLineItem;

/// Formats an amount as dollars with two decimals, e.g. `$12.50`.
pub fn format_price(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Apple, 1x Banana"`.
pub fn format_item_summary(items: &[CartLineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.product.title))
        .collect::<Vec<_>>()
        .join(", ")
}
