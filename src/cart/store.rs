//! Cart Store
//!
//! The single owner of the shopper's cart. Every mutation is written through
//! to [`CartStorage`] before returning, and startup reads the persisted cart
//! back, treating anything unreadable as an empty cart.

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::models::{CartLineItem, CartNotice};
use super::storage::CartStorage;
use crate::catalog::Product;

/// Storage key holding the JSON-encoded cart.
pub const CART_STORAGE_KEY: &str = "cart";

pub struct CartStore {
    items: Vec<CartLineItem>,
    storage: Box<dyn CartStorage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Loads the persisted cart, falling back to an empty one.
    pub fn load(storage: impl CartStorage + 'static) -> Self {
        let items = read_persisted(&storage);
        info!(lines = items.len(), "cart loaded");
        Self {
            items,
            storage: Box::new(storage),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// An existing line for the same id has its quantity bumped instead of a
    /// second line being created.
    pub fn add_to_cart(&mut self, product: Product) -> CartNotice {
        let notice = match self.items.iter_mut().find(|item| item.id() == product.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                CartNotice::QuantityIncreased
            }
            None => {
                self.items.push(CartLineItem::new(product));
                CartNotice::Added
            }
        };
        self.persist();
        notice
    }

    /// Removes the line for `id`; absent ids are ignored.
    pub fn remove_from_cart(&mut self, id: u64) -> CartNotice {
        self.items.retain(|item| item.id() != id);
        self.persist();
        CartNotice::Removed
    }

    /// Sets the quantity for `id`, clamping anything below 1 up to 1.
    ///
    /// Returns `None` when `id` is not in the cart.
    pub fn update_quantity(&mut self, id: u64, quantity: i64) -> Option<CartNotice> {
        let item = self.items.iter_mut().find(|item| item.id() == id)?;
        item.quantity = clamp_quantity(quantity);
        self.persist();
        Some(CartNotice::QuantityUpdated)
    }

    pub fn is_in_cart(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Empties the cart and drops the persisted copy.
    pub fn clear(&mut self) {
        self.items.clear();
        if let Err(err) = self.storage.remove(CART_STORAGE_KEY) {
            error!(error = %err, "failed to clear persisted cart");
        }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "failed to encode cart");
                return;
            }
        };
        match self.storage.set(CART_STORAGE_KEY, &raw) {
            Ok(()) => debug!(lines = self.items.len(), "cart persisted"),
            Err(err) => error!(error = %err, "failed to persist cart"),
        }
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

fn read_persisted(storage: &dyn CartStorage) -> Vec<CartLineItem> {
    let raw = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(error = %err, "failed to read persisted cart, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
        Ok(items) => sanitize(items),
        Err(err) => {
            warn!(error = %err, "failed to parse persisted cart, starting empty");
            Vec::new()
        }
    }
}

/// Restores the cart invariants on data read back from storage: valid
/// products, unique ids (first line wins) and quantities of at least 1.
fn sanitize(items: Vec<CartLineItem>) -> Vec<CartLineItem> {
    let mut clean: Vec<CartLineItem> = Vec::with_capacity(items.len());
    for mut item in items {
        if let Err(err) = item.product.validate() {
            warn!(id = item.id(), error = %err, "dropping invalid persisted cart line");
            continue;
        }
        if clean.iter().any(|seen| seen.id() == item.id()) {
            warn!(id = item.id(), "dropping duplicate persisted cart line");
            continue;
        }
        item.quantity = item.quantity.max(1);
        clean.push(item);
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::storage::MemoryStorage;
    use serde_json::json;

    fn product(id: u64, price: i64) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": price,
        }))
        .unwrap()
    }

    fn empty_store() -> (CartStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (CartStore::load(storage.clone()), storage)
    }

    #[test]
    fn repeated_adds_bump_one_line() {
        let (mut store, _) = empty_store();
        for n in 1..=5 {
            store.add_to_cart(product(1, 10));
            assert_eq!(store.items().len(), 1);
            assert_eq!(store.items()[0].quantity, n);
        }
    }

    #[test]
    fn add_twice_yields_quantity_two() {
        let (mut store, _) = empty_store();
        assert_eq!(store.add_to_cart(product(1, 10)), CartNotice::Added);
        assert_eq!(
            store.add_to_cart(product(1, 10)),
            CartNotice::QuantityIncreased
        );

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), 1);
        assert_eq!(items[0].product.price, Decimal::from(10));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let (mut store, _) = empty_store();
        store.add_to_cart(product(3, 1));
        store.add_to_cart(product(1, 1));
        store.add_to_cart(product(3, 1));
        store.add_to_cart(product(2, 1));

        let ids: Vec<u64> = store.items().iter().map(CartLineItem::id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn remove_then_membership_is_false() {
        let (mut store, _) = empty_store();
        store.add_to_cart(product(1, 10));
        store.add_to_cart(product(2, 10));

        assert_eq!(store.remove_from_cart(1), CartNotice::Removed);
        assert!(!store.is_in_cart(1));
        assert!(store.is_in_cart(2));

        store.remove_from_cart(42);
        assert!(!store.is_in_cart(42));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn non_positive_quantities_clamp_to_one() {
        let (mut store, _) = empty_store();
        store.add_to_cart(product(1, 10));

        for q in [0, -1, -100, i64::MIN] {
            store.update_quantity(1, 7);
            store.update_quantity(1, q);
            assert_eq!(store.items()[0].quantity, 1, "quantity {q}");
        }

        store.update_quantity(1, 4);
        assert_eq!(store.items()[0].quantity, 4);
    }

    #[test]
    fn updating_absent_id_is_noop() {
        let (mut store, _) = empty_store();
        store.add_to_cart(product(1, 10));
        assert_eq!(store.update_quantity(9, 3), None);
        assert_eq!(store.items()[0].quantity, 1);
    }

    #[test]
    fn persisted_cart_round_trips() {
        let (mut store, storage) = empty_store();
        store.add_to_cart(product(5, 3));
        store.add_to_cart(product(2, 7));
        store.add_to_cart(product(5, 3));
        store.update_quantity(2, 9);

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.items(), store.items());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let (mut store, storage) = empty_store();
        store.add_to_cart(product(1, 10));
        let saved: Vec<CartLineItem> =
            serde_json::from_str(&storage.get(CART_STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved.len(), 1);

        store.remove_from_cart(1);
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn malformed_storage_starts_empty() {
        for raw in ["not json", "{\"id\": 1}", "[{\"title\": \"no id\"}]", "null"] {
            let storage = MemoryStorage::new();
            storage.set(CART_STORAGE_KEY, raw).unwrap();
            let store = CartStore::load(storage);
            assert!(store.is_empty(), "raw {raw:?}");
        }
    }

    #[test]
    fn persisted_invariants_are_restored() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_STORAGE_KEY,
                r#"[{"id":1,"title":"a","price":1,"quantity":0},
                    {"id":1,"title":"dup","price":1,"quantity":3}]"#,
            )
            .unwrap();

        let store = CartStore::load(storage);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 1);
        assert_eq!(store.items()[0].product.title, "a");
    }

    #[test]
    fn invalid_persisted_lines_are_dropped() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_STORAGE_KEY,
                r#"[{"id":0,"title":"no id","price":1,"quantity":1},
                    {"id":2,"title":"refund","price":-5,"quantity":1},
                    {"id":3,"title":"ok","price":5,"quantity":2}]"#,
            )
            .unwrap();

        let store = CartStore::load(storage);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id(), 3);
        assert_eq!(store.total_price(), Decimal::new(10, 0));
    }

    #[test]
    fn clear_removes_persisted_key() {
        let (mut store, storage) = empty_store();
        store.add_to_cart(product(1, 10));
        store.clear();

        assert!(store.is_empty());
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
        assert!(CartStore::load(storage).is_empty());
    }

    #[test]
    fn totals_cover_all_lines() {
        let (mut store, _) = empty_store();
        assert_eq!(store.total_price(), Decimal::ZERO);

        store.add_to_cart(product(1, 10));
        store.add_to_cart(product(1, 10));
        store.add_to_cart(product(2, 5));

        assert_eq!(store.total_price(), Decimal::from(25));
        assert_eq!(store.total_quantity(), 3);
    }
}
