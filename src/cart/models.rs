//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart items
fn default_quantity() -> u32 {
    1
}

/// A product held in the cart, with how many of it.
///
/// Serialises flat: the product's own fields plus `quantity`, which is the
/// layout persisted in storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,

    /// Quantity of this item, never below 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> u64 {
        self.product.id
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Feedback shown to the shopper after a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartNotice {
    Added,
    QuantityIncreased,
    Removed,
    QuantityUpdated,
}

impl CartNotice {
    pub fn message(self) -> &'static str {
        match self {
            CartNotice::Added => "Added to cart",
            CartNotice::QuantityIncreased => "Increased quantity",
            CartNotice::Removed => "Removed from cart",
            CartNotice::QuantityUpdated => "Quantity updated",
        }
    }

    /// Whether the notice reports a success or a removal.
    pub fn is_success(self) -> bool {
        !matches!(self, CartNotice::Removed)
    }
}

/// Body of `PATCH /cart/items/{id}`
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    /// Any integer; values below 1 are clamped to 1
    pub quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_item_serialises_flat() {
        let product: Product =
            serde_json::from_value(json!({ "id": 1, "title": "Soap", "price": 10 })).unwrap();
        let mut item = CartLineItem::new(product);
        item.quantity = 2;

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["title"], "Soap");
        assert_eq!(item.line_total(), Decimal::from(20));
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let item: CartLineItem =
            serde_json::from_value(json!({ "id": 4, "title": "Brush", "price": 2.5 })).unwrap();
        assert_eq!(item.quantity, 1);
    }
}
