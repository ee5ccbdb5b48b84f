//! Bits shared by every rendered view.

/// Storefront name shown in page titles.
pub const STORE_NAME: &str = "Kradoo";

/// Title for a view, e.g. `Shop | Kradoo`.
pub fn page_title(page: &str) -> String {
    format!("{page} | {STORE_NAME}")
}
