//! Product feed loading for the storefront catalog.
//!
//! This crate provides:
//! - `ProductFeed` - Async source of raw product records
//! - `RawProduct` - Feed records and their normalization into catalog products
//! - `CatalogLoader` - Drives the catalog fetch lifecycle with timeout and retry
//! - `RetryPolicy` - Retry strategies

mod error;
mod loader;
mod record;
mod retry;
mod source;

pub use error::*;
pub use loader::*;
pub use record::*;
pub use retry::*;
pub use source::*;
