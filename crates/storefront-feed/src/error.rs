//! Feed error types.

use storefront_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur while fetching and normalizing the product feed.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Reading the feed failed.
    #[error("Feed I/O error: {0}")]
    Io(String),

    /// The feed source is unreachable or returned an error status.
    #[error("Feed unavailable: {0}")]
    Unavailable(String),

    /// The fetch did not complete in time.
    #[error("Feed timed out after {0}ms")]
    Timeout(u64),

    /// The payload is not a JSON array of product records.
    #[error("Failed to parse feed: {0}")]
    Json(String),

    /// A record parsed but cannot become a product.
    #[error("Invalid product record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The catalog rejected the lifecycle transition (e.g. a fetch is
    /// already in flight).
    #[error(transparent)]
    Lifecycle(#[from] CommerceError),
}

impl FeedError {
    /// Whether trying again could succeed. Bad payloads are not retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FeedError::Io(_) | FeedError::Unavailable(_) | FeedError::Timeout(_)
        )
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Json(e.to_string())
    }
}

impl From<std::io::Error> for FeedError {
    fn from(e: std::io::Error) -> Self {
        FeedError::Io(e.to_string())
    }
}
