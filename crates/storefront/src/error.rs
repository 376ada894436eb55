//! Unified error handling.
//!
//! Store operations themselves never fail (persistence problems are logged
//! and recovered). The errors here come from setting a storefront up:
//! reading configuration, opening a storage backend, loading a catalog.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product ID not present in the catalog.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = StorefrontError::from(StorageError::InvalidKey("../x".to_string()));
        assert_eq!(err.to_string(), "Storage error: Invalid storage key: \"../x\"");
    }

    #[test]
    fn test_from_conversions() {
        let err: StorefrontError =
            ConfigError::InvalidEnvVar("CARTWHEEL_SUGGESTION_LIMIT".to_string(), "bad".to_string())
                .into();
        assert!(matches!(err, StorefrontError::Config(_)));

        let err: StorefrontError = CatalogError::UnsupportedFormat("x.csv".into()).into();
        assert!(matches!(err, StorefrontError::Catalog(_)));
    }
}
