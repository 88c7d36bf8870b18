//! Catalog engine configuration.

use serde::{Deserialize, Serialize};

/// Window sizing for the catalog engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Items shown per page in page mode.
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Items appended by each infinite-scroll load.
    #[serde(default = "default_batch_size")]
    pub infinite_batch_size: usize,
}

fn default_items_per_page() -> usize {
    8
}

fn default_batch_size() -> usize {
    8
}

impl CatalogConfig {
    /// Create a config; sizes below 1 are raised to 1.
    pub fn new(items_per_page: usize, infinite_batch_size: usize) -> Self {
        Self {
            items_per_page,
            infinite_batch_size,
        }
        .normalized()
    }

    /// Raise zero sizes to 1.
    pub fn normalized(self) -> Self {
        Self {
            items_per_page: self.items_per_page.max(1),
            infinite_batch_size: self.infinite_batch_size.max(1),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            infinite_batch_size: default_batch_size(),
        }
    }
}
