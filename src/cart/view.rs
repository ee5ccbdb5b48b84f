//! Cart documents returned to the UI.

use serde::Serialize;

use super::helpers::format_price;
use super::models::{CartLineItem, CartNotice};
use super::store::CartStore;
use crate::views::page_title;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// One rendered cart line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartLineItem,

    /// Unit price, e.g. `$9.99`
    pub unit_price: String,

    /// Unit price times quantity, e.g. `$19.98`
    pub line_total: String,
}

impl From<&CartLineItem> for CartLine {
    fn from(item: &CartLineItem) -> Self {
        Self {
            unit_price: format_price(item.product.price),
            line_total: format_price(item.line_total()),
            item: item.clone(),
        }
    }
}

/// The rendered cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartView {
    pub title: String,
    pub lines: Vec<CartLine>,
    pub total: String,

    /// Units across all lines, shown on the navbar badge
    pub count: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl CartView {
    pub fn from_store(store: &CartStore) -> Self {
        Self {
            title: page_title("Cart"),
            lines: store.items().iter().map(CartLine::from).collect(),
            total: format_price(store.total_price()),
            count: store.total_quantity(),
            empty_message: store.is_empty().then_some(EMPTY_CART_MESSAGE),
        }
    }
}

/// Response to a cart mutation: the notice plus the updated cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartMutation {
    pub notice: String,
    pub success: bool,
    pub cart: CartView,
}

impl CartMutation {
    pub fn new(notice: CartNotice, store: &CartStore) -> Self {
        Self {
            notice: notice.message().to_string(),
            success: notice.is_success(),
            cart: CartView::from_store(store),
        }
    }
}
