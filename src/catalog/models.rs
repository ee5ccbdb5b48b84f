//! Catalog Domain Models
//!
//! Data structures served by the remote catalog service. Field names follow
//! the catalog's camelCase wire format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// Product Models
// =============================================================================

/// A product as served by the catalog. Immutable from the storefront's side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique positive identifier
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Unit price, non-negative
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,

    /// Units in stock; `Some(0)` means the product cannot be bought
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

/// A product that breaks the id or price rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidProduct {
    #[error("Product ID is missing")]
    MissingId,
    #[error("Price must not be negative")]
    NegativePrice,
}

impl Product {
    /// Checks that the id is positive and the price non-negative.
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        if self.id == 0 {
            return Err(InvalidProduct::MissingId);
        }
        if self.price < Decimal::ZERO {
            return Err(InvalidProduct::NegativePrice);
        }
        Ok(())
    }

    /// Whether the catalog reports no stock left.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == Some(0)
    }

    /// Price before the advertised discount, rounded to cents.
    ///
    /// Returns `None` when there is no positive discount or the discount
    /// would make the original price undefined (100% or more).
    pub fn original_price(&self) -> Option<Decimal> {
        let pct = self.discount_percentage.filter(|pct| *pct > 0.0)?;
        let pct = Decimal::try_from(pct).ok()?;
        let remaining = Decimal::ONE - pct / Decimal::ONE_HUNDRED;
        if remaining <= Decimal::ZERO {
            return None;
        }
        Some((self.price / remaining).round_dp(2))
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub reviewer_name: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub comment: String,
}

// =============================================================================
// Listing Models
// =============================================================================

/// One page of a product listing.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,

    /// Set for category listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductPage {
    /// Builds a page from a raw catalog response, tolerating missing or
    /// mistyped fields.
    ///
    /// `products` falls back to an empty list, `total` and `skip` to zero,
    /// and a missing or zero `limit` to `requested_limit`.
    pub fn from_response(body: &Value, requested_limit: u64) -> Self {
        let products = match body.get("products") {
            Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "catalog returned malformed products list");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let field = |name: &str| body.get(name).and_then(Value::as_u64).unwrap_or(0);
        let limit = match field("limit") {
            0 => requested_limit,
            n => n,
        };

        Self {
            products,
            total: field("total"),
            skip: field("skip"),
            limit,
            category: None,
        }
    }
}

/// Paging and ordering parameters shared by listing requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub skip: u64,
    pub sort: Option<crate::listing::Sort>,
}

impl PageRequest {
    pub fn new(limit: u64, skip: u64) -> Self {
        Self {
            limit,
            skip,
            sort: None,
        }
    }

    pub fn sorted(mut self, sort: Option<crate::listing::Sort>) -> Self {
        self.sort = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_deserializes_minimal_catalog_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "title": "Essence Mascara",
            "price": 9.99,
            "someFutureField": true
        }))
        .unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.price, Decimal::new(999, 2));
        assert!(product.description.is_empty());
        assert!(product.reviews.is_empty());
        assert_eq!(product.stock, None);
    }

    #[test]
    fn validation_rejects_zero_id_and_negative_price() {
        let product = |id: u64, price: f64| -> Product {
            serde_json::from_value(json!({ "id": id, "title": "x", "price": price })).unwrap()
        };

        assert_eq!(product(1, 0.0).validate(), Ok(()));
        assert_eq!(product(1, 9.99).validate(), Ok(()));
        assert_eq!(product(0, 9.99).validate(), Err(InvalidProduct::MissingId));
        assert_eq!(product(2, -50.0).validate(), Err(InvalidProduct::NegativePrice));
    }

    #[test]
    fn product_reads_camel_case_optionals() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Lipstick",
            "price": 20,
            "discountPercentage": 20.0,
            "stock": 0,
            "reviews": [{ "reviewerName": "Ann", "rating": 5, "comment": "Great" }]
        }))
        .unwrap();

        assert!(product.is_out_of_stock());
        assert_eq!(product.reviews[0].reviewer_name, "Ann");
        assert_eq!(product.original_price(), Some(Decimal::new(2500, 2)));
    }

    #[test]
    fn original_price_absent_without_discount() {
        let product: Product =
            serde_json::from_value(json!({ "id": 1, "title": "x", "price": 5 })).unwrap();
        assert_eq!(product.original_price(), None);
    }

    #[test]
    fn page_defaults_missing_fields() {
        let page = ProductPage::from_response(&json!({}), 20);
        assert!(page.products.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn page_replaces_malformed_products_with_empty_list() {
        let page = ProductPage::from_response(
            &json!({ "products": "nope", "total": "many", "skip": 40, "limit": 20 }),
            10,
        );
        assert!(page.products.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.skip, 40);
        assert_eq!(page.limit, 20);
    }
}
