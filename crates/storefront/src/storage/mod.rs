//! Key-value persistence for store state.
//!
//! Every store persists its whole state under one string key after each
//! mutation and rehydrates from that key when opened. The backend is a
//! [`KeyValueStore`] injected at construction time:
//!
//! - [`MemoryStore`] - Ephemeral, in-process map (tests, throwaway sessions)
//! - [`FileStore`] - One JSON file per key under a data directory
//!
//! Stores never talk to a backend directly; they go through a typed
//! [`Slot`], which owns serialization and the recover-to-empty policy for
//! unreadable values.
//!
//! # Keys
//!
//! | key | contents |
//! |-----|----------|
//! | [`CART_KEY`] | serialized cart state |
//! | [`RECENT_SEARCHES_KEY`] | array of query strings |
//! | [`RECENTLY_VIEWED_KEY`] | array of product snapshots |
//! | [`WISHLIST_KEY`] | array of product snapshots |

mod file;
mod memory;
mod slot;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use slot::{SaveError, Slot};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "ecommerce-cart";
/// Storage key holding recent search queries.
pub const RECENT_SEARCHES_KEY: &str = "ecommerce-recent-searches";
/// Storage key holding recently viewed products.
pub const RECENTLY_VIEWED_KEY: &str = "ecommerce-recently-viewed";
/// Storage key holding wishlisted products.
pub const WISHLIST_KEY: &str = "ecommerce-wishlist";

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A string-keyed, string-valued persistence backend.
///
/// Implementations must be cheap to share behind an `Arc`; stores hold one
/// handle each and call into it synchronously after every mutation.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
