//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
///
/// Products are immutable values; identity is the sole equality key, so two
/// records with the same `id` compare equal even if other fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Category label, compared case-sensitively.
    pub category: String,
    /// Unit price, never negative.
    pub price: Money,
    /// Opaque image reference (usually a URL).
    pub image: String,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
}

impl Product {
    /// Create a product, clamping the rating into `[0, 5]` and a negative
    /// price up to zero.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        rating: f64,
    ) -> Self {
        let price = if price.is_negative() {
            Money::zero(price.currency)
        } else {
            price
        };
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            price,
            image: String::new(),
            rating: clamp_rating(rating),
        }
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Case-insensitive title match against an already-lowercased needle.
    pub(crate) fn title_contains_lower(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Clamp a rating into `[0, 5]`; NaN becomes 0.
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new(1, "Backpack", "bags", Money::usd(10995), 3.9)
            .with_image("https://img.example/1.jpg");
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.amount_cents, 10995);
        assert_eq!(product.image, "https://img.example/1.jpg");
    }

    #[test]
    fn test_identity_is_equality_key() {
        let a = Product::new(7, "A", "x", Money::usd(100), 1.0);
        let b = Product::new(7, "B", "y", Money::usd(200), 2.0);
        let c = Product::new(8, "A", "x", Money::usd(100), 1.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rating_and_price_clamped() {
        let p = Product::new(1, "T", "c", Money::usd(-5), 7.5);
        assert_eq!(p.rating, 5.0);
        assert!(p.price.is_zero());
        assert_eq!(clamp_rating(f64::NAN), 0.0);
        assert_eq!(clamp_rating(-1.0), 0.0);
    }
}
