//! Product detail document.

use serde::Serialize;

use crate::cart::helpers::format_price;
use crate::catalog::Product;
use crate::views::page_title;

/// The primary button on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAction {
    Add,
    Remove,
    /// Disabled; the product cannot be added
    OutOfStock,
}

impl CartAction {
    pub fn for_product(product: &Product, in_cart: bool) -> Self {
        if product.is_out_of_stock() {
            CartAction::OutOfStock
        } else if in_cart {
            CartAction::Remove
        } else {
            CartAction::Add
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CartAction::Add => "Add to Cart",
            CartAction::Remove => "Remove from Cart",
            CartAction::OutOfStock => "Out of Stock",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductDetail {
    pub title: String,
    pub product: Product,
    pub price: String,

    /// Pre-discount price, only when a discount applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,

    pub in_cart: bool,
    pub action: CartAction,
    pub action_label: &'static str,
    pub review_count: usize,

    /// Image shown first in the gallery
    pub selected_image: String,
}

impl ProductDetail {
    pub fn new(product: Product, in_cart: bool) -> Self {
        let action = CartAction::for_product(&product, in_cart);
        Self {
            title: page_title(&product.title),
            price: format_price(product.price),
            original_price: product.original_price().map(format_price),
            in_cart,
            action,
            action_label: action.label(),
            review_count: product.reviews.len(),
            selected_image: product.thumbnail.clone(),
            product,
        }
    }
}
