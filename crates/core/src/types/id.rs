//! Newtype IDs for type-safe entity references.
//!
//! Product identifiers are opaque strings supplied by the catalog. Wrapping
//! them keeps a product ID from being confused with a search query or a
//! category name at call sites that take several strings.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a catalog product.
///
/// # Example
///
/// ```rust
/// use cartwheel_core::ProductId;
///
/// let id = ProductId::new("2");
/// assert_eq!(id.as_str(), "2");
/// assert_eq!(id, ProductId::from("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
