//! Product Detail Module
//!
//! Single-product view and its add/remove cart toggle.

pub mod handlers;
pub mod view;

pub use handlers::routes;
pub use view::{CartAction, ProductDetail};
