//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::CatalogConfig;
use storefront_feed::{BackoffStrategy, FetchPolicy, RetryPolicy};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Product feed location.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Page and batch sizes.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Retry behaviour for feed fetches.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Fetch policy built from the `[feed]` and `[retry]` sections.
    pub fn fetch_policy(&self) -> FetchPolicy {
        let backoff = if self.retry.backoff_ms == 0 {
            BackoffStrategy::None
        } else {
            let base = Duration::from_millis(self.retry.backoff_ms);
            BackoffStrategy::Exponential {
                base,
                max: base.saturating_mul(8),
            }
        };

        FetchPolicy::new(
            self.feed.timeout_ms.map(Duration::from_millis),
            RetryPolicy::new(self.retry.max_retries).with_backoff(backoff),
        )
    }
}

/// Feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Path to the JSON product feed, relative to the working directory.
    #[serde(default = "default_feed_path")]
    pub path: String,

    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: Option<u64>,
}

fn default_feed_path() -> String {
    "products.json".to_string()
}

fn default_timeout_ms() -> Option<u64> {
    Some(10_000)
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: default_feed_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff in milliseconds; doubles per retry. 0 disables waiting.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    200
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset (e.g. `"info"`).
    #[serde(default)]
    pub level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.feed.path, "products.json");
        assert_eq!(config.catalog.items_per_page, 8);
        assert_eq!(config.catalog.infinite_batch_size, 8);
        assert_eq!(config.retry.max_retries, 2);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_toml_sections() {
        let config: CliConfig = toml::from_str(
            r#"
            [feed]
            path = "data/products.json"
            timeout_ms = 500

            [catalog]
            items_per_page = 4
            infinite_batch_size = 12

            [retry]
            max_retries = 0
            backoff_ms = 0

            [logging]
            format = "json"
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.feed.path, "data/products.json");
        assert_eq!(config.catalog.items_per_page, 4);
        assert_eq!(config.catalog.infinite_batch_size, 12);
        assert_eq!(config.logging.format, LogFormat::Json);

        let policy = config.fetch_policy();
        assert_eq!(policy.timeout, Some(Duration::from_millis(500)));
        assert_eq!(policy.retry.max_retries, 0);
        assert_eq!(policy.retry.backoff, BackoffStrategy::None);
    }

    #[test]
    fn test_backoff_grows_from_base() {
        let config: CliConfig = serde_json::from_str(r#"{"retry": {"backoff_ms": 100}}"#).unwrap();
        let backoff = config.fetch_policy().retry.backoff;
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(10), Duration::from_millis(800));
    }
}
