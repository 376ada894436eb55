//! Storefront state shared by a front end.

use std::sync::Arc;

use cartwheel_core::{Product, ProductId};
use tracing::info;

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::recently_viewed::RecentlyViewedStore;
use crate::search::SuggestionEngine;
use crate::storage::{FileStore, KeyValueStore};
use crate::wishlist::WishlistStore;

/// Every store a storefront front end drives, opened over one storage
/// backend.
///
/// The stores are independent; this struct only wires them to the same
/// backend and configuration, and resolves product IDs against the catalog
/// for front ends that deal in IDs rather than [`Product`] values.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Catalog,
    pub cart: CartStore,
    pub search: SuggestionEngine,
    pub recently_viewed: RecentlyViewedStore,
    pub wishlist: WishlistStore,
}

impl Storefront {
    /// Open all stores over `storage`.
    #[must_use]
    pub fn open(
        config: StorefrontConfig,
        catalog: Catalog,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let cart = CartStore::open(storage.clone());
        let search = SuggestionEngine::with_limits(
            storage.clone(),
            config.suggestion_limit,
            config.recent_search_limit,
        );
        let recently_viewed =
            RecentlyViewedStore::with_limit(storage.clone(), config.recently_viewed_limit);
        let wishlist = WishlistStore::open(storage);

        info!(
            products = catalog.len(),
            cart_items = cart.state().item_count(),
            "Storefront opened"
        );

        Self {
            config,
            catalog,
            cart,
            search,
            recently_viewed,
            wishlist,
        }
    }

    /// Open all stores over a [`FileStore`] in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Storage`] if the data directory cannot be
    /// created.
    pub fn open_in_data_dir(config: StorefrontConfig, catalog: Catalog) -> Result<Self> {
        let storage = FileStore::open(&config.data_dir)?;
        Ok(Self::open(config, catalog, Arc::new(storage)))
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a product ID against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] for unknown IDs.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))
    }

    /// Add a catalog product to the cart by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] for unknown IDs.
    pub fn add_to_cart(&mut self, id: &ProductId, quantity: u32) -> Result<()> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;
        self.cart.add_to_cart(product, quantity);
        Ok(())
    }

    /// Record a product page view by ID and return the product.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] for unknown IDs.
    pub fn view_product(&mut self, id: &ProductId) -> Result<&Product> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;
        self.recently_viewed.record_view(product);
        Ok(product)
    }

    /// Toggle a catalog product on the wishlist by ID.
    ///
    /// Returns `true` when the product is on the wishlist afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotFound`] for unknown IDs.
    pub fn toggle_wishlist(&mut self, id: &ProductId) -> Result<bool> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| StorefrontError::NotFound(format!("product {id}")))?;
        Ok(self.wishlist.toggle(product))
    }

    /// Suggestions for `query` using the configured limit.
    #[must_use]
    pub fn suggest(&self, query: &str) -> Vec<&Product> {
        self.search
            .suggest_default(query, self.catalog.products())
    }

    /// Record a submitted search and return every matching product.
    pub fn submit_search(&mut self, query: &str) -> Vec<&Product> {
        self.search.submit_search(query, self.catalog.products())
    }
}
