//! Execution engine module
//!
//! Runs one sync: event in, matching videos (or an error) out.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Parses the event, drives the paginator, applies the matcher
//! - `SyncState` - Lifecycle of a run
//! - `SyncStats` - Counters for the last run

mod types;

pub use types::{SyncState, SyncStats};

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::event::{Event, SyncRequest};
use crate::http::{HttpClient, HttpClientConfig};
use crate::matcher::Matcher;
use crate::pagination::{paginator_for, ApiPageFetcher, PageFetcher};
use crate::types::Video;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for a video collection
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// Sync configuration
    config: SyncConfig,
    /// State of the current (or last) run
    state: SyncState,
    /// Statistics of the current (or last) run
    stats: SyncStats,
}

impl SyncEngine {
    /// Create an engine, building its HTTP client from the config
    pub fn new(config: SyncConfig) -> Result<Self> {
        config.validate()?;
        let http_config = HttpClientConfig::builder()
            .base_url(&config.base_url)
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build();
        let client = HttpClient::with_config(http_config)?;
        Ok(Self::with_client(client, config))
    }

    /// Create an engine around an existing client
    pub fn with_client(client: HttpClient, config: SyncConfig) -> Self {
        Self {
            client,
            config,
            state: SyncState::default(),
            stats: SyncStats::default(),
        }
    }

    /// Get the sync configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// State of the current (or last) run
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Statistics of the current (or last) run
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Run a sync for an invocation event
    ///
    /// Returns every public video with at least one requested tag, in
    /// page-then-position order. Any failure fails the whole run.
    pub async fn run(&mut self, event: &Event) -> Result<Vec<Video>> {
        self.reset();

        let request = match event.parse() {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e)),
        };

        let fetcher = ApiPageFetcher::new(
            self.client.clone(),
            self.config.endpoint.as_str(),
            request.token.as_str(),
        );
        self.run_with_fetcher(&request, &fetcher).await
    }

    /// Run a sync for an already validated request against any fetcher
    pub async fn run_with_fetcher(
        &mut self,
        request: &SyncRequest,
        fetcher: &dyn PageFetcher,
    ) -> Result<Vec<Video>> {
        let start = Instant::now();
        self.reset();
        info!(
            "Starting sync for {} tags ({:?} pagination)",
            request.tags.len(),
            self.config.strategy
        );

        self.transition(SyncState::FetchingPages);
        let paginator = paginator_for(&self.config);
        let pages = match paginator.fetch_all(fetcher).await {
            Ok(pages) => pages,
            Err(e) => return Err(self.fail(e)),
        };
        self.transition(SyncState::AllPagesFetched);

        let page_count = pages.len();
        let videos: Vec<Video> = pages.into_iter().flat_map(|page| page.data).collect();
        self.stats.add_pages(page_count, videos.len());

        self.transition(SyncState::Filtering);
        let matcher = Matcher::with_mode(request.tags.clone(), self.config.match_mode);
        let matched = matcher.filter(videos);
        self.stats.add_matched(matched.len());
        self.stats.set_duration(start.elapsed().as_millis() as u64);

        self.transition(SyncState::Completed);
        info!(
            "Completed sync: {} of {} videos matched across {} pages in {}ms",
            self.stats.videos_matched,
            self.stats.videos_seen,
            self.stats.pages_fetched,
            self.stats.duration_ms
        );

        Ok(matched)
    }

    fn reset(&mut self) {
        self.state = SyncState::Started;
        self.stats = SyncStats::default();
    }

    fn transition(&mut self, next: SyncState) {
        debug!("Sync state: {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: Error) -> Error {
        warn!("Sync failed while {}: {error}", self.state);
        self.transition(SyncState::Failed);
        error
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Run a single sync with a fresh engine
pub async fn run(event: &Event, config: SyncConfig) -> Result<Vec<Video>> {
    SyncEngine::new(config)?.run(event).await
}
