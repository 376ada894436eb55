//! Shopping cart state and store.
//!
//! [`CartState`] is the pure data: ordered lines plus the derived total and
//! item count, which are recomputed after every change and cannot be set on
//! their own. [`CartStore`] wraps a state with its persistence [`Slot`] and
//! writes the whole state back after each operation.
//!
//! # Persisted shape
//!
//! ```json
//! {"items":[{"product":{...},"quantity":3}],"total":"899.97","itemCount":3}
//! ```
//!
//! `total` and `itemCount` are written for readers of the raw value but
//! ignored on load; they are recomputed from `items`.

use std::sync::Arc;

use cartwheel_core::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::storage::{CART_KEY, KeyValueStore, Slot};

/// One product/quantity pairing inside the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product taken when it was first added.
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Reasons a stored cart is rejected on load.
#[derive(Debug, thiserror::Error)]
pub enum CartStateError {
    #[error("duplicate cart line for product {0}")]
    DuplicateLine(ProductId),
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// Serialized form of [`CartState`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedCart {
    items: Vec<CartLine>,
    #[serde(skip_deserializing)]
    total: Price,
    #[serde(skip_deserializing)]
    item_count: u64,
}

/// Cart lines in insertion order plus derived totals.
///
/// Invariants:
/// - at most one line per product ID
/// - every line has `quantity >= 1`
/// - `total` and `item_count` always match the lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedCart", into = "PersistedCart")]
pub struct CartState {
    items: Vec<CartLine>,
    total: Price,
    item_count: u64,
}

impl CartState {
    /// Build a state from lines, checking the line invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartStateError`] on duplicate product IDs or zero quantities.
    pub fn from_lines(items: Vec<CartLine>) -> Result<Self, CartStateError> {
        for (index, line) in items.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartStateError::ZeroQuantity(line.product.id.clone()));
            }
            if items
                .iter()
                .skip(index + 1)
                .any(|other| other.product.id == line.product.id)
            {
                return Err(CartStateError::DuplicateLine(line.product.id.clone()));
            }
        }

        let mut state = Self {
            items,
            ..Self::default()
        };
        state.recompute();
        Ok(state)
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub const fn item_count(&self) -> u64 {
        self.item_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.items.iter().find(|line| &line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.items
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }

    fn recompute(&mut self) {
        self.total = self.items.iter().map(CartLine::line_total).sum();
        self.item_count = self
            .items
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum();
    }

    fn add(&mut self, product: &Product, quantity: u32) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLine {
                product: product.clone(),
                quantity,
            });
        }
        self.recompute();
    }

    fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| &line.product.id != product_id);
        self.recompute();
        self.items.len() != before
    }

    fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        let Some(line) = self.line_mut(product_id) else {
            return false;
        };
        line.quantity = quantity;
        self.recompute();
        true
    }
}

impl TryFrom<PersistedCart> for CartState {
    type Error = CartStateError;

    fn try_from(persisted: PersistedCart) -> Result<Self, Self::Error> {
        Self::from_lines(persisted.items)
    }
}

impl From<CartState> for PersistedCart {
    fn from(state: CartState) -> Self {
        Self {
            items: state.items,
            total: state.total,
            item_count: state.item_count,
        }
    }
}

/// The shopping cart, persisted after every operation.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    slot: Slot<CartState>,
}

impl CartStore {
    /// Open the cart stored under the default key.
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::open_at(storage, CART_KEY)
    }

    /// Open the cart stored under `key`, starting empty if nothing usable
    /// is stored there.
    #[instrument(skip(storage))]
    #[must_use]
    pub fn open_at(storage: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let slot: Slot<CartState> = Slot::new(storage, key);
        let state = slot.load();
        debug!(
            lines = state.items().len(),
            item_count = state.item_count(),
            "Cart rehydrated"
        );
        Self { state, slot }
    }

    /// Current cart contents and totals.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.state.line(product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.state.line(product_id).is_some()
    }

    /// Add `quantity` units of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line.
    /// A zero quantity changes nothing.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            warn!(product_id = %product.id, "Ignoring add_to_cart with zero quantity");
        } else {
            self.state.add(product, quantity);
            debug!(product_id = %product.id, quantity, "Added to cart");
        }
        self.persist();
    }

    /// Remove the line for `product_id`. Absent products are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        if !self.state.remove(product_id) {
            debug!(%product_id, "remove_from_cart: product not in cart");
        }
        self.persist();
    }

    /// Replace the quantity of the line for `product_id`.
    ///
    /// A zero quantity removes the line. Absent products are a no-op.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return;
        }
        if !self.state.set_quantity(product_id, quantity) {
            debug!(%product_id, "update_quantity: product not in cart");
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.state = CartState::default();
        self.persist();
    }

    fn persist(&self) {
        self.slot.save(&self.state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: &str, name: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Price::from_cents(cents),
            original_price: None,
            category: "Electronics".to_string(),
            rating: 4.0,
            review_count: 10,
            in_stock: true,
            image: format!("{id}.jpg"),
            tags: Vec::new(),
        }
    }

    fn headphones() -> Product {
        product("1", "Wireless Bluetooth Headphones", 19_999)
    }

    fn watch() -> Product {
        product("2", "Smart Fitness Watch", 29_999)
    }

    fn store() -> (Arc<MemoryStore>, CartStore) {
        let storage = Arc::new(MemoryStore::new());
        let cart = CartStore::open(storage.clone());
        (storage, cart)
    }

    fn assert_consistent(state: &CartState) {
        let count: u64 = state.items().iter().map(|l| u64::from(l.quantity)).sum();
        let total: Price = state.items().iter().map(CartLine::line_total).sum();
        assert_eq!(state.item_count(), count);
        assert_eq!(state.total(), total);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let (_, mut cart) = store();
        cart.add_to_cart(&watch(), 1);
        cart.add_to_cart(&watch(), 2);

        let state = cart.state();
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.total(), Price::from_cents(89_997));
        assert_eq!(state.total().to_string(), "$899.97");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let (_, mut cart) = store();
        cart.add_to_cart(&watch(), 1);
        cart.add_to_cart(&headphones(), 1);
        cart.add_to_cart(&watch(), 1);

        let ids: Vec<&str> = cart
            .state()
            .items()
            .iter()
            .map(|l| l.product.id.as_str())
            .collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn test_zero_quantity_add_is_ignored() {
        let (_, mut cart) = store();
        cart.add_to_cart(&watch(), 0);
        assert!(cart.state().is_empty());
        assert_eq!(cart.state().item_count(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (_, mut cart) = store();
        cart.add_to_cart(&watch(), 2);
        cart.remove_from_cart(&ProductId::new("missing"));
        assert_eq!(cart.state().item_count(), 2);
    }

    #[test]
    fn test_update_quantity_replaces_in_place() {
        let (_, mut cart) = store();
        cart.add_to_cart(&headphones(), 1);
        cart.add_to_cart(&watch(), 1);
        cart.update_quantity(&headphones().id, 4);

        let state = cart.state();
        assert_eq!(state.items()[0].product.id, headphones().id);
        assert_eq!(state.items()[0].quantity, 4);
        assert_eq!(state.item_count(), 5);
        assert_eq!(state.total(), Price::from_cents(4 * 19_999 + 29_999));
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let (_, mut cart) = store();
        cart.add_to_cart(&watch(), 1);
        cart.update_quantity(&headphones().id, 3);
        assert_eq!(cart.state().items().len(), 1);
        assert!(!cart.contains(&headphones().id));
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let (_, mut via_update) = store();
        let (_, mut via_remove) = store();
        for cart in [&mut via_update, &mut via_remove] {
            cart.add_to_cart(&headphones(), 2);
            cart.add_to_cart(&watch(), 1);
        }

        via_update.update_quantity(&watch().id, 0);
        via_remove.remove_from_cart(&watch().id);

        assert_eq!(via_update.state(), via_remove.state());
        assert!(!via_update.contains(&watch().id));
    }

    #[test]
    fn test_clear_cart_resets_everything() {
        let (storage, mut cart) = store();
        cart.add_to_cart(&headphones(), 2);
        cart.add_to_cart(&watch(), 5);
        cart.clear_cart();

        assert!(cart.state().is_empty());
        assert_eq!(cart.state().total(), Price::ZERO);
        assert_eq!(cart.state().item_count(), 0);

        let raw: serde_json::Value =
            serde_json::from_str(&storage.get(CART_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["items"], serde_json::json!([]));
        assert_eq!(raw["itemCount"], 0);
    }

    #[test]
    fn test_totals_never_drift() {
        let (_, mut cart) = store();
        let catalog = [
            headphones(),
            watch(),
            product("3", "Organic Cotton T-Shirt", 2_999),
        ];

        // Deterministic pseudo-random walk over the three operations.
        let mut seed: u32 = 17;
        for _ in 0..300 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let item = &catalog[(seed as usize / 7) % catalog.len()];
            match seed % 3 {
                0 => cart.add_to_cart(item, seed % 4),
                1 => cart.remove_from_cart(&item.id),
                _ => cart.update_quantity(&item.id, seed % 5),
            }
            assert_consistent(cart.state());
            assert!(cart.state().items().iter().all(|l| l.quantity >= 1));
        }
    }

    #[test]
    fn test_every_operation_persists() {
        let (storage, mut cart) = store();
        cart.add_to_cart(&watch(), 3);

        let reopened = CartStore::open(storage.clone());
        assert_eq!(reopened.state(), cart.state());

        cart.update_quantity(&watch().id, 1);
        assert_eq!(CartStore::open(storage.clone()).state().item_count(), 1);

        cart.remove_from_cart(&watch().id);
        assert!(CartStore::open(storage).state().is_empty());
    }

    #[test]
    fn test_unparseable_cart_falls_back_to_empty() {
        let storage = Arc::new(MemoryStore::with_entries([(CART_KEY, "not json")]));
        let cart = CartStore::open(storage);
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_stored_totals_are_recomputed() {
        let line = serde_json::json!({
            "product": watch(),
            "quantity": 2
        });
        let raw = serde_json::json!({
            "items": [line],
            "total": "1.00",
            "itemCount": 99
        });
        let storage = Arc::new(MemoryStore::with_entries([(CART_KEY, raw.to_string())]));

        let cart = CartStore::open(storage);
        assert_eq!(cart.state().item_count(), 2);
        assert_eq!(cart.state().total(), Price::from_cents(59_998));
    }

    #[test]
    fn test_malformed_stored_totals_are_ignored() {
        for (total, item_count) in [
            (serde_json::json!("-1"), serde_json::json!(3)),
            (serde_json::Value::Null, serde_json::json!(3)),
            (serde_json::json!("899.97"), serde_json::json!(-1)),
            (serde_json::json!({ "amount": 1 }), serde_json::json!("three")),
        ] {
            let raw = serde_json::json!({
                "items": [{ "product": watch(), "quantity": 3 }],
                "total": total,
                "itemCount": item_count
            });
            let storage = Arc::new(MemoryStore::with_entries([(CART_KEY, raw.to_string())]));

            let cart = CartStore::open(storage);
            assert_eq!(cart.state().items().len(), 1, "stored value: {raw}");
            assert_eq!(cart.state().item_count(), 3);
            assert_eq!(cart.state().total(), Price::from_cents(89_997));
        }
    }

    #[test]
    fn test_stored_cart_without_totals_loads() {
        let raw = serde_json::json!({ "items": [{ "product": watch(), "quantity": 1 }] });
        let storage = Arc::new(MemoryStore::with_entries([(CART_KEY, raw.to_string())]));

        let cart = CartStore::open(storage);
        assert_eq!(cart.state().item_count(), 1);
    }

    #[test]
    fn test_stored_duplicate_lines_are_rejected() {
        let line = serde_json::json!({ "product": watch(), "quantity": 1 });
        let raw = serde_json::json!({ "items": [line.clone(), line], "total": "0", "itemCount": 0 });
        let storage = Arc::new(MemoryStore::with_entries([(CART_KEY, raw.to_string())]));

        assert!(CartStore::open(storage).state().is_empty());
    }

    #[test]
    fn test_stored_negative_quantity_is_rejected() {
        let line = serde_json::json!({ "product": watch(), "quantity": -2 });
        let raw = serde_json::json!({ "items": [line], "total": "0", "itemCount": 0 });
        let storage = Arc::new(MemoryStore::with_entries([(CART_KEY, raw.to_string())]));

        assert!(CartStore::open(storage).state().is_empty());
    }

    #[test]
    fn test_from_lines_rejects_zero_quantity() {
        let result = CartState::from_lines(vec![CartLine {
            product: watch(),
            quantity: 0,
        }]);
        assert!(matches!(result, Err(CartStateError::ZeroQuantity(_))));
    }
}
