//! Typed handle binding one storage key to one serialized value.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{KeyValueStore, StorageError};

/// The persistence port a store uses for its state.
///
/// `load` never fails: a missing value, an unreadable backend, or a value
/// that no longer parses all yield `T::default()` (the latter two are logged).
/// `save` is fire-and-forget: a failed write is logged and the in-memory
/// state stays authoritative.
pub struct Slot<T> {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    _state: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish_non_exhaustive()
    }
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Bind `key` on `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            _state: PhantomData,
        }
    }

    /// Read and parse the stored value, falling back to `T::default()`.
    pub fn load(&self) -> T {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No stored value, starting empty");
                return T::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored value, starting empty");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Discarding unparseable stored value");
            if let Err(e) = self.storage.remove(&self.key) {
                warn!(key = %self.key, error = %e, "Failed to remove unparseable stored value");
            }
            T::default()
        })
    }

    /// Serialize and write `value`, logging (not returning) any failure.
    pub fn save(&self, value: &T) {
        if let Err(e) = self.try_save(value) {
            warn!(key = %self.key, error = %e, "Failed to persist state");
        }
    }

    /// Serialize and write `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError`] if serialization or the backend write fails.
    pub fn try_save(&self, value: &T) -> Result<(), SaveError> {
        let raw = serde_json::to_string(value)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }

}

/// Errors from [`Slot::try_save`].
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Debug, Default, PartialEq, Serialize, serde::Deserialize)]
    struct Counter {
        hits: u32,
    }

    /// Backend whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_load_missing_is_default() {
        let slot: Slot<Counter> = Slot::new(Arc::new(MemoryStore::new()), "counter");
        assert_eq!(slot.load(), Counter::default());
    }

    #[test]
    fn test_save_then_load() {
        let storage = Arc::new(MemoryStore::new());
        let slot: Slot<Counter> = Slot::new(storage.clone(), "counter");
        slot.save(&Counter { hits: 3 });

        assert_eq!(storage.get("counter").unwrap().as_deref(), Some("{\"hits\":3}"));
        assert_eq!(slot.load(), Counter { hits: 3 });
    }

    #[test]
    fn test_load_unparseable_is_default() {
        let storage = Arc::new(MemoryStore::with_entries([("counter", "{not json")]));
        let slot: Slot<Counter> = Slot::new(storage.clone(), "counter");
        assert_eq!(slot.load(), Counter::default());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_broken_backend_is_recovered() {
        let slot: Slot<Counter> = Slot::new(Arc::new(BrokenStore), "counter");
        assert_eq!(slot.load(), Counter::default());
        slot.save(&Counter { hits: 1 });
        assert!(matches!(
            slot.try_save(&Counter { hits: 1 }),
            Err(SaveError::Storage(StorageError::Poisoned))
        ));
    }
}
