//! Product feed sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::record::{parse_records, RawProduct};
use crate::FeedError;

/// A source of raw product records.
#[async_trait]
pub trait ProductFeed: Send + Sync {
    /// Fetch the full list of records.
    async fn fetch(&self) -> Result<Vec<RawProduct>, FeedError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Feed backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    records: Vec<RawProduct>,
}

impl StaticFeed {
    /// Create a feed that always returns `records`.
    pub fn new(records: Vec<RawProduct>) -> Self {
        Self { records }
    }

    /// Create a feed from a JSON array payload.
    pub fn from_json(json: &str) -> Result<Self, FeedError> {
        Ok(Self::new(parse_records(json.as_bytes())?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ProductFeed for StaticFeed {
    async fn fetch(&self) -> Result<Vec<RawProduct>, FeedError> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Feed read from a JSON file on each fetch.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
    name: String,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProductFeed for JsonFileFeed {
    async fn fetch(&self) -> Result<Vec<RawProduct>, FeedError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FeedError::Unavailable(format!("{} not found", self.name))
            } else {
                FeedError::from(e)
            }
        })?;
        parse_records(&bytes)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
