//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartLineItem, notices, inputs)
//! - The cart store and its durable storage
//! - Rendered cart documents
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod storage;
pub mod store;
pub mod view;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{CartLineItem, CartNotice};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, CART_STORAGE_KEY};
