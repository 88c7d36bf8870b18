//! Product catalog module.
//!
//! Contains the product type, category selection, fetch lifecycle, and the
//! catalog state engine that ties them to the search pipeline.

mod category;
mod config;
mod product;
mod state;
mod status;

pub use category::{category_list, CategoryFilter, ALL_LABEL};
pub use config::CatalogConfig;
pub use product::{clamp_rating, Product, MAX_RATING};
pub use state::CatalogState;
pub use status::{FetchStatus, FetchTracker};
