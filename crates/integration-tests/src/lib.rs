//! Integration tests for Cartwheel.
//!
//! These tests drive the storefront stores over a real [`FileStore`] in a
//! temporary directory, reopening stores to check what survives a restart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! [`FileStore`]: cartwheel_storefront::storage::FileStore

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use cartwheel_core::{Price, Product, ProductId};
use cartwheel_storefront::storage::{FileStore, KeyValueStore};
use cartwheel_storefront::{Catalog, Storefront, StorefrontConfig};

/// A catalog product with sensible defaults.
#[must_use]
pub fn product(id: &str, name: &str, category: &str, cents: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name} for everyday use"),
        price: Price::from_cents(cents),
        original_price: None,
        category: category.to_string(),
        rating: 4.2,
        review_count: 30,
        in_stock: true,
        image: format!("/images/{id}.jpg"),
        tags: Vec::new(),
    }
}

/// The sample catalog used across the integration tests.
///
/// # Panics
///
/// Panics if the fixture products are invalid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product("1", "Wireless Bluetooth Headphones", "Electronics", 19_999),
        product("2", "Smart Fitness Watch", "Electronics", 29_999),
        product("3", "Organic Cotton T-Shirt", "Clothing", 2_999),
        product("4", "Stainless Steel Water Bottle", "Home", 3_499),
        product("5", "Leather Laptop Bag", "Accessories", 14_999),
        product("6", "Ceramic Coffee Mug Set", "Home", 4_999),
    ])
    .unwrap()
}

/// Open a file-backed store rooted at `dir`.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn file_store(dir: &Path) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::open(dir).unwrap())
}

/// Open a storefront over the sample catalog, persisting into `dir`.
///
/// # Panics
///
/// Panics if the data directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn open_storefront(dir: &Path) -> Storefront {
    let config = StorefrontConfig {
        data_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    };
    Storefront::open_in_data_dir(config, sample_catalog()).unwrap()
}
