//! Recently viewed products.

use std::sync::Arc;

use cartwheel_core::Product;
use tracing::{debug, instrument};

use crate::history::BoundedHistory;
use crate::storage::{KeyValueStore, RECENTLY_VIEWED_KEY, Slot};

/// Default number of recently viewed products remembered.
pub const DEFAULT_RECENTLY_VIEWED_LIMIT: usize = 10;

/// Most-recent-first list of viewed products, deduplicated by product ID.
#[derive(Debug)]
pub struct RecentlyViewedStore {
    history: BoundedHistory<Product>,
    slot: Slot<Vec<Product>>,
}

impl RecentlyViewedStore {
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_limit(storage, DEFAULT_RECENTLY_VIEWED_LIMIT)
    }

    #[instrument(skip(storage))]
    #[must_use]
    pub fn with_limit(storage: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        let slot = Slot::new(storage, RECENTLY_VIEWED_KEY);
        let history = BoundedHistory::from_items(slot.load(), limit);
        debug!(viewed = history.len(), "Recently viewed rehydrated");
        Self { history, slot }
    }

    /// Move `product` to the front of the list, dropping the oldest entry
    /// once the list is full.
    pub fn record_view(&mut self, product: &Product) {
        self.history
            .push_front_by(product.clone(), |p| p.id.clone());
        self.persist();
    }

    /// Viewed products, most recent first.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        self.history.items()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.persist();
    }

    fn persist(&self) {
        self.slot.save(&self.history.items().to_vec());
    }
}
