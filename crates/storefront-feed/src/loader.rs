//! Drives the catalog fetch lifecycle from a product feed.

use storefront_commerce::catalog::{CatalogState, Product};
use tracing::{debug, error, warn};

use crate::record::normalize_all;
use crate::retry::FetchPolicy;
use crate::source::ProductFeed;
use crate::FeedError;

/// Loads a feed into a [`CatalogState`], applying timeout and retry policy.
pub struct CatalogLoader<F: ProductFeed> {
    feed: F,
    policy: FetchPolicy,
}

impl<F: ProductFeed> CatalogLoader<F> {
    /// Create a loader with the default policy.
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            policy: FetchPolicy::default(),
        }
    }

    /// Set the fetch policy.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Run a single fetch attempt.
    ///
    /// The catalog is `Loading` for the duration of the fetch and ends up
    /// `Idle` with the new products or `Failed` with the error message.
    /// Returns the number of products loaded.
    pub async fn load(&self, state: &mut CatalogState) -> Result<usize, FeedError> {
        state.fetch_requested()?;
        debug!(feed = self.feed.name(), "Fetching product feed");

        match self.fetch_products().await {
            Ok(products) => {
                state.fetch_succeeded(products)?;
                let loaded = state.items().len();
                debug!(feed = self.feed.name(), products = loaded, "Feed applied");
                Ok(loaded)
            }
            Err(err) => {
                state.fetch_failed(err.to_string())?;
                warn!(feed = self.feed.name(), error = %err, "Feed fetch failed");
                Err(err)
            }
        }
    }

    /// Fetch with retries. Non-retryable errors fail immediately.
    pub async fn load_with_retry(&self, state: &mut CatalogState) -> Result<usize, FeedError> {
        let retry = self.policy.retry;
        let mut attempt = 0;

        loop {
            match self.load(state).await {
                Ok(loaded) => return Ok(loaded),
                Err(err) if retry.should_retry(&err, attempt) => {
                    let delay = retry.backoff.delay_for_attempt(attempt);
                    debug!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying feed fetch"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!(
                        feed = self.feed.name(),
                        attempts = attempt + 1,
                        error = %err,
                        "Giving up on feed"
                    );
                    return Err(err);
                }
            }
        }
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, FeedError> {
        let records = match self.policy.timeout {
            Some(limit) => tokio::time::timeout(limit, self.feed.fetch())
                .await
                .map_err(|_| FeedError::Timeout(limit.as_millis() as u64))??,
            None => self.feed.fetch().await?,
        };
        normalize_all(records)
    }
}
