//! Catalog product record.
//!
//! Products are supplied by the catalog and are read-only to the stores:
//! the cart, wishlist and recently-viewed lists keep snapshots of them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Highest allowed product rating.
pub const MAX_RATING: f64 = 5.0;

/// Validation errors for a [`Product`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// The product ID is empty.
    #[error("product id cannot be empty")]
    EmptyId,
    /// The original (pre-discount) price is lower than the current price.
    #[error("product {id}: original price {original} is below price {price}")]
    OriginalBelowPrice {
        id: ProductId,
        price: Price,
        original: Price,
    },
    /// The rating is outside 0.0..=5.0 (or not a number).
    #[error("product {id}: rating {rating} is outside 0.0..=5.0")]
    RatingOutOfRange { id: ProductId, rating: f64 },
}

/// A catalog product.
///
/// Serialized in camelCase so persisted snapshots keep the shape the
/// storefront has always written (`originalPrice`, `inStock`, `reviews`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    pub category: String,
    pub rating: f64,
    #[serde(rename = "reviews")]
    pub review_count: u32,
    pub in_stock: bool,
    /// Image reference (URL or asset path).
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// Check the numeric constraints of the record.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.id.as_str().is_empty() {
            return Err(ProductError::EmptyId);
        }
        if let Some(original) = self.original_price
            && original < self.price
        {
            return Err(ProductError::OriginalBelowPrice {
                id: self.id.clone(),
                price: self.price,
                original,
            });
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(ProductError::RatingOutOfRange {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        Ok(())
    }

    /// Discount off the original price, as a whole percentage.
    ///
    /// Returns `None` when there is no original price or no actual discount.
    #[must_use]
    pub fn discount_percentage(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.is_zero() {
            return None;
        }
        let original = original.amount();
        let percent = ((original - self.price.amount()) / original * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        u32::try_from(percent).ok().filter(|p| *p > 0)
    }

    /// Whether the product's name, category or description contains
    /// `needle`, ignoring case.
    ///
    /// `needle` must already be lowercase; callers lowercase the query once
    /// and test it against many products.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Wireless Bluetooth Headphones".to_string(),
            description: "Premium wireless headphones with noise cancellation.".to_string(),
            price: Price::from_cents(19_999),
            original_price: Some(Price::from_cents(24_999)),
            category: "Electronics".to_string(),
            rating: 4.5,
            review_count: 1247,
            in_stock: true,
            image: "headphones.jpg".to_string(),
            tags: vec!["wireless".to_string(), "bluetooth".to_string()],
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_product() {
        assert!(headphones().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_original_below_price() {
        let mut product = headphones();
        product.original_price = Some(Price::from_cents(100));
        assert!(matches!(
            product.validate(),
            Err(ProductError::OriginalBelowPrice { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_rating_out_of_range() {
        let mut product = headphones();
        product.rating = 5.5;
        assert!(matches!(
            product.validate(),
            Err(ProductError::RatingOutOfRange { .. })
        ));

        product.rating = f64::NAN;
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut product = headphones();
        product.id = ProductId::new("");
        assert_eq!(product.validate(), Err(ProductError::EmptyId));
    }

    #[test]
    fn test_discount_percentage() {
        // (249.99 - 199.99) / 249.99 = 20.0008%
        assert_eq!(headphones().discount_percentage(), Some(20));

        let mut full_price = headphones();
        full_price.original_price = None;
        assert_eq!(full_price.discount_percentage(), None);

        full_price.original_price = Some(full_price.price);
        assert_eq!(full_price.discount_percentage(), None);

        let mut free = headphones();
        free.price = Price::ZERO;
        free.original_price = Some(Price::ZERO);
        assert_eq!(free.discount_percentage(), None);
    }

    #[test]
    fn test_matches_lowercase_fields() {
        let product = headphones();
        assert!(product.matches_lowercase("bluetooth"));
        assert!(product.matches_lowercase("electro"));
        assert!(product.matches_lowercase("noise"));
        assert!(!product.matches_lowercase("watch"));
    }

    #[test]
    fn test_serde_uses_storefront_field_names() {
        let json = serde_json::to_value(headphones()).unwrap();
        assert_eq!(json["originalPrice"], "249.99");
        assert_eq!(json["inStock"], true);
        assert_eq!(json["reviews"], 1247);

        let parsed: Product = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, headphones());
    }
}
