//! Cartwheel Storefront library.
//!
//! Client-side storefront state: the shopping cart, search suggestions with
//! a recent-search history, recently viewed products and a wishlist. Every
//! store is an explicit instance built over an injected
//! [`KeyValueStore`](storage::KeyValueStore) and writes its full state back
//! after each operation.
//!
//! # Modules
//!
//! - [`cart`] - Cart lines, derived totals, [`CartStore`](cart::CartStore)
//! - [`search`] - Substring suggestions and recent searches
//! - [`recently_viewed`] - Bounded recently-viewed list
//! - [`wishlist`] - Saved products
//! - [`catalog`] - Validated product list with filter/sort browsing
//! - [`storage`] - Persistence port and backends
//! - [`state`] - [`Storefront`](state::Storefront), all stores wired together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod recently_viewed;
pub mod search;
pub mod state;
pub mod storage;
pub mod wishlist;

pub use cart::{CartLine, CartState, CartStore};
pub use catalog::{BrowseQuery, Catalog, CategoryFilter, SortOrder};
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use recently_viewed::RecentlyViewedStore;
pub use search::SuggestionEngine;
pub use state::Storefront;
pub use wishlist::WishlistStore;
