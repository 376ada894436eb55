//! Wishlist of saved products.
//!
//! Unlike the history lists the wishlist is unbounded and only changes on
//! explicit user action. Newly saved products go to the front.

use std::sync::Arc;

use cartwheel_core::{Product, ProductId};
use tracing::{debug, instrument};

use crate::storage::{KeyValueStore, Slot, WISHLIST_KEY};

/// Persisted list of wishlisted products, at most one entry per product ID.
#[derive(Debug)]
pub struct WishlistStore {
    items: Vec<Product>,
    slot: Slot<Vec<Product>>,
}

impl WishlistStore {
    #[instrument(skip(storage))]
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let slot: Slot<Vec<Product>> = Slot::new(storage, WISHLIST_KEY);
        let mut items = slot.load();
        // A hand-edited file may repeat a product; keep the first entry.
        let mut seen = Vec::with_capacity(items.len());
        items.retain(|p| {
            if seen.contains(&p.id) {
                false
            } else {
                seen.push(p.id.clone());
                true
            }
        });
        debug!(saved = items.len(), "Wishlist rehydrated");
        Self { items, slot }
    }

    /// Add `product` if absent, remove it if present.
    ///
    /// Returns `true` when the product is on the wishlist afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            self.remove(&product.id);
            false
        } else {
            self.add(product);
            true
        }
    }

    /// Save `product`. Already-saved products are left where they are.
    pub fn add(&mut self, product: &Product) {
        if !self.contains(&product.id) {
            self.items.insert(0, product.clone());
        }
        self.persist();
    }

    /// Drop the product with `product_id`. Absent products are a no-op.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|p| &p.id != product_id);
        self.persist();
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    /// Saved products, most recently saved first.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    fn persist(&self) {
        self.slot.save(&self.items);
    }
}
