//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::CatalogState;
use storefront_feed::{CatalogLoader, JsonFileFeed};

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd, &output) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Fetch the product feed into a fresh catalog.
    ///
    /// `feed_override` takes precedence over `[feed] path`.
    pub async fn load_catalog(&self, feed_override: Option<&str>) -> Result<CatalogState> {
        let feed_path = self.resolve_path(feed_override.unwrap_or(self.config.feed.path.as_str()));
        self.output
            .debug(&format!("Loading feed from {}", feed_path.display()));

        let loader = CatalogLoader::new(JsonFileFeed::new(&feed_path))
            .with_policy(self.config.fetch_policy());
        let mut state = CatalogState::new(self.config.catalog);

        let spinner = self.output.spinner("Loading products...");
        let result = loader.load_with_retry(&mut state).await;
        spinner.finish_and_clear();

        let loaded = result.with_context(|| format!("Failed to load feed: {}", feed_path.display()))?;
        tracing::info!(feed = %feed_path.display(), products = loaded, "Catalog ready");
        Ok(state)
    }
}

/// Find config file in directory tree.
///
/// Logging is not installed yet at this point, so unreadable files are
/// reported through `output`.
fn find_config(start: &Path, output: &Output) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(config_path.to_str()?) {
                    Ok(config) => return Some((config, config_path)),
                    Err(e) => output.warn(&format!(
                        "Ignoring unreadable config {}: {:#}",
                        config_path.display(),
                        e
                    )),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("storefront-cli-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.join("storefront.toml"),
            "[catalog]\nitems_per_page = 3\n",
        )
        .unwrap();

        let (config, path) = find_config(&nested, &Output::new(false, true)).unwrap();
        assert_eq!(config.catalog.items_per_page, 3);
        assert_eq!(path, root.join("storefront.toml"));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_unreadable_config_is_skipped() {
        let root = std::env::temp_dir().join(format!("storefront-cli-bad-{}", std::process::id()));
        let nested = root.join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("storefront.toml"), "[catalog\nbroken").unwrap();
        std::fs::write(root.join("storefront.json"), r#"{"feed": {"path": "feed.json"}}"#).unwrap();

        let (config, path) = find_config(&nested, &Output::new(false, true)).unwrap();
        assert_eq!(config.feed.path, "feed.json");
        assert_eq!(path, root.join("storefront.json"));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
