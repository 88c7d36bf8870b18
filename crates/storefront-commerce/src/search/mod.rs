//! Search module.
//!
//! Contains the filter criteria, the filter/sort pipeline, and the
//! pagination window over its results.

mod filter;
mod query;
mod results;

pub use filter::{apply, sort_products};
pub use query::{FilterCriteria, PriceRange, RatingRange, SortMode};
pub(crate) use query::normalize_search;
pub use results::{total_pages, Pagination, Window};
