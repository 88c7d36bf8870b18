//! Category selection for catalog browsing.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Label shown for the "no category filter" choice.
pub const ALL_LABEL: &str = "All";

/// Category selector applied by the filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Exactly this category label (case-sensitive).
    Named(String),
}

impl CategoryFilter {
    /// Create a filter for a named category.
    pub fn named(label: impl Into<String>) -> Self {
        CategoryFilter::Named(label.into())
    }

    /// Parse a selector as it arrives from a picker: `"All"` selects everything,
    /// anything else is a category label.
    pub fn from_label(label: &str) -> Self {
        if label == ALL_LABEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    /// Label for display.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_LABEL,
            CategoryFilter::Named(label) => label,
        }
    }

    /// Check whether a product passes this selector.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(label) => product.category == *label,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Build the category picker list: `All` first, then every distinct category
/// in first-observed order.
pub fn category_list(items: &[Product]) -> Vec<CategoryFilter> {
    let mut seen = HashSet::new();
    let mut categories = vec![CategoryFilter::All];
    for product in items {
        if seen.insert(product.category.as_str()) {
            categories.push(CategoryFilter::Named(product.category.clone()));
        }
    }
    categories
}
