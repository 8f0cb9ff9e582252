//! Sync configuration
//!
//! Everything about the remote API and the sync behaviour that is not part
//! of the invocation event. Loaded from YAML (or JSON) and validated before
//! use; every field has a default so an empty document is a valid config.

use crate::error::{Error, Result};
use crate::matcher::MatchMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.vimeo.com";

/// Default collection endpoint
pub const DEFAULT_ENDPOINT: &str = "/me/videos";

/// Default page size requested from the API
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Which pagination algorithm to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// Read `total` from page 1 and fetch the remaining pages concurrently
    #[default]
    PageCount,
    /// Follow `paging.next` one page at a time
    NextUrl,
}

/// Configuration for a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Base URL for API requests
    pub base_url: String,

    /// Path of the video collection
    pub endpoint: String,

    /// Items requested per page
    pub page_size: u32,

    /// Pagination algorithm
    pub strategy: PaginationStrategy,

    /// Upper bound on concurrent page fetches (unbounded when unset)
    pub max_concurrency: Option<usize>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// How video tags are compared against the requested tags
    pub match_mode: MatchMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            strategy: PaginationStrategy::default(),
            max_concurrency: None,
            timeout_secs: 30,
            user_agent: format!("video-tag-sync/{}", env!("CARGO_PKG_VERSION")),
            match_mode: MatchMode::default(),
        }
    }
}

impl SyncConfig {
    /// Create a default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from a YAML (or JSON) string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        if self.max_concurrency == Some(0) {
            return Err(Error::config("max_concurrency must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the pagination strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: PaginationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Bound concurrent page fetches
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the tag match mode
    #[must_use]
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }
}
