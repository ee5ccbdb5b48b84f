//! Catalog Module
//!
//! Client side of the remote product catalog service:
//! - Product and listing models
//! - HTTP client
//! - Error classification into shopper-facing messages

pub mod client;
pub mod error;
pub mod models;

pub use client::{CatalogClient, CatalogClientConfig, DEFAULT_REQUEST_TIMEOUT};
pub use error::CatalogError;
pub use models::{InvalidProduct, PageRequest, Product, ProductPage, Review};
