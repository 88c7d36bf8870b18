//! Filter criteria and sort modes.

use crate::catalog::{CategoryFilter, MAX_RATING};
use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort options for the filtered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep feed order.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by rating, low to high.
    RatingAsc,
    /// Sort by rating, high to low.
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::None,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::RatingAsc,
        SortMode::RatingDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::RatingAsc => "rating-asc",
            SortMode::RatingDesc => "rating-desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::None => "Default",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
            SortMode::RatingAsc => "Rating: Low to High",
            SortMode::RatingDesc => "Rating: High to Low",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sort mode: {}", s))
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    min: Money,
    max: Money,
}

impl PriceRange {
    /// Build a range, rejecting negative bounds, mixed currencies and
    /// `min > max`.
    pub fn new(min: Money, max: Money) -> Result<Self, CommerceError> {
        if min.currency != max.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: min.currency.code().to_string(),
                got: max.currency.code().to_string(),
            });
        }
        if min.is_negative() || max.is_negative() || min.amount_cents > max.amount_cents {
            return Err(CommerceError::InvalidPriceRange {
                min: min.display(),
                max: max.display(),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Money {
        self.min
    }

    pub fn max(&self) -> Money {
        self.max
    }

    pub fn contains(&self, price: Money) -> bool {
        self.min.amount_cents <= price.amount_cents && price.amount_cents <= self.max.amount_cents
    }
}

/// Inclusive rating bounds within `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    min: f64,
    max: f64,
}

impl RatingRange {
    /// The whole rating scale.
    pub const FULL: RatingRange = RatingRange {
        min: 0.0,
        max: MAX_RATING,
    };

    /// Build a range, rejecting non-finite bounds, bounds outside `[0, 5]`
    /// and `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, CommerceError> {
        let in_scale = |v: f64| v.is_finite() && (0.0..=MAX_RATING).contains(&v);
        if !in_scale(min) || !in_scale(max) || min > max {
            return Err(CommerceError::InvalidRatingRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, rating: f64) -> bool {
        self.min <= rating && rating <= self.max
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }
}

impl Default for RatingRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// The current category/search/price/rating/sort selection.
///
/// Bounds are validated when set, so the pipeline never sees an inverted range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterCriteria {
    /// Category selector.
    pub category: CategoryFilter,
    /// Sort mode, applied last.
    pub sort: SortMode,
    /// Price bounds; `None` covers the full observed range.
    pub price: Option<PriceRange>,
    /// Rating bounds.
    pub rating: RatingRange,
    /// Title search text.
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_price(mut self, range: PriceRange) -> Self {
        self.price = Some(range);
        self
    }

    pub fn with_rating(mut self, range: RatingRange) -> Self {
        self.rating = range;
        self
    }

    /// Set the title search. Blank text clears it.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = normalize_search(query.into());
        self
    }

    /// Whether every stage would keep every product and sorting is off.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Trim search text; blank becomes `None`.
pub(crate) fn normalize_search(query: String) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
