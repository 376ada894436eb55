//! The in-memory product catalog and its browse view.
//!
//! The catalog is static input: it is built once from a product list (or a
//! JSON/YAML file) and never fetched, cached or invalidated here.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cartwheel_core::{Product, ProductError, ProductId};
use thiserror::Error;
use tracing::{info, instrument};

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported catalog format {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),

    #[error("Duplicate product id: {0}")]
    DuplicateProduct(ProductId),
}

/// Validated list of products in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, validating every product and rejecting duplicate IDs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidProduct`] or
    /// [`CatalogError::DuplicateProduct`].
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// Load a catalog from a `.json`, `.yaml` or `.yml` file holding a list
    /// of products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed, or if
    /// its contents fail validation.
    #[instrument]
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |message: String| CatalogError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let products: Vec<Product> = match extension.as_deref() {
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            _ => return Err(CatalogError::UnsupportedFormat(path.to_path_buf())),
        };

        let catalog = Self::new(products)?;
        info!(
            products = catalog.len(),
            categories = catalog.categories().len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// All products in source order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Filter and sort the catalog for the product grid.
    #[must_use]
    pub fn browse(&self, query: &BrowseQuery) -> Vec<&Product> {
        let needle = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| needle.as_deref().is_none_or(|n| p.matches_lowercase(n)))
            .filter(|p| query.category.matches(&p.category))
            .collect();

        query.sort.sort(&mut products);
        products
    }
}

/// Category restriction for [`Catalog::browse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact (case-sensitive) category name.
    Named(String),
}

impl CategoryFilter {
    /// Parse a filter value; `"all"` (or empty) means no restriction.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s == "all" {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

/// Product grid sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortOrder {
    /// Parse from a sort control value. Unknown values sort by name.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            _ => Self::Name,
        }
    }

    /// Convert to the sort control value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    /// Stable in-place sort.
    fn sort(self, products: &mut [&Product]) {
        match self {
            Self::Name => products.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            }),
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}

/// Parameters of a product grid view.
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    /// Substring filter over name, category and description.
    pub search: Option<String>,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}
