//! Catalog browsing and cart aggregation for the storefront.
//!
//! This crate holds the stateful core behind the product listing:
//!
//! - **Catalog**: products, categories, the fetch lifecycle, and
//!   [`CatalogState`](catalog::CatalogState), which keeps the filtered and
//!   windowed views consistent with the product collection
//! - **Search**: filter criteria, the filter/sort pipeline, pagination
//! - **Cart**: line items merged by product id, with quantity limits and pricing
//!
//! Everything here is synchronous and does no I/O; the product feed lives in
//! `storefront-feed`.
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let mut catalog = CatalogState::new(CatalogConfig::new(2, 2));
//! catalog.fetch_requested().unwrap();
//! catalog
//!     .fetch_succeeded(vec![
//!         Product::new(1, "Backpack", "bags", Money::usd(10995), 3.9),
//!         Product::new(2, "T-Shirt", "clothing", Money::usd(2230), 4.1),
//!         Product::new(3, "Jacket", "clothing", Money::usd(5599), 4.7),
//!     ])
//!     .unwrap();
//!
//! catalog.set_sort_mode(SortMode::PriceAsc);
//! assert_eq!(catalog.total_pages(), 2);
//! assert_eq!(catalog.paginated()[0].title, "T-Shirt");
//!
//! let mut cart = Cart::new();
//! cart.add_to_cart(&catalog.paginated()[0], 2);
//! assert_eq!(cart.total_item_count(), 2);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        CatalogConfig, CatalogState, CategoryFilter, FetchStatus, FetchTracker, Product,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, LinePricing, MAX_QUANTITY_PER_LINE};

    // Search
    pub use crate::search::{FilterCriteria, Pagination, PriceRange, RatingRange, SortMode, Window};
}
