//! Raw feed records and their normalization into catalog products.

use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::{clamp_rating, Product};
use storefront_commerce::money::{Currency, Money};

use crate::FeedError;

/// A product record as the feed sends it.
///
/// Unknown fields (descriptions and so on) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<RawRating>,
}

/// The feed's rating field: either `{ "rate": 3.9, "count": 120 }` or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRating {
    Scalar(f64),
    Detailed {
        #[serde(default)]
        rate: Option<f64>,
        #[serde(default)]
        count: Option<u64>,
    },
}

impl RawRating {
    /// Flat numeric rating; a missing rate counts as 0.
    pub fn value(&self) -> f64 {
        match self {
            RawRating::Scalar(rate) => *rate,
            RawRating::Detailed { rate, .. } => rate.unwrap_or(0.0),
        }
    }
}

impl RawProduct {
    /// Convert into a catalog product. `index` is the record's position in
    /// the feed, used in error messages.
    pub fn normalize(self, index: usize) -> Result<Product, FeedError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(FeedError::InvalidRecord {
                index,
                reason: format!("price must be a non-negative number, got {}", self.price),
            });
        }

        let rating = clamp_rating(self.rating.as_ref().map_or(0.0, RawRating::value));
        let price = Money::from_decimal(self.price, Currency::USD);

        Ok(Product::new(self.id, self.title, self.category, price, rating).with_image(self.image))
    }
}

/// Normalize a whole feed, failing on the first invalid record.
pub fn normalize_all(records: Vec<RawProduct>) -> Result<Vec<Product>, FeedError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.normalize(index))
        .collect()
}

/// Parse a JSON array of product records.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawProduct>, FeedError> {
    Ok(serde_json::from_slice(bytes)?)
}
