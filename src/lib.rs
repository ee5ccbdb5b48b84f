//! Storefront Library
//!
//! Backend for a catalog storefront: browse a remote product catalog with
//! category, sort and page selection kept in the URL, hold a cart that
//! survives restarts, and walk through a simulated checkout.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod listing;
pub mod product;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod views;
