//! Engine types
//!
//! Lifecycle state and statistics for a sync run.

use serde::Serialize;
use std::fmt;

/// Lifecycle of a single sync run
///
/// `Started -> FetchingPages -> AllPagesFetched -> Filtering -> Completed`,
/// with any failure going straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Run created, event not yet parsed
    #[default]
    Started,
    /// Pages are being fetched
    FetchingPages,
    /// Every page has been fetched
    AllPagesFetched,
    /// Applying the matcher
    Filtering,
    /// Finished with a result
    Completed,
    /// Finished with an error
    Failed,
}

impl SyncState {
    /// Whether the run has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Started => "started",
            Self::FetchingPages => "fetching_pages",
            Self::AllPagesFetched => "all_pages_fetched",
            Self::Filtering => "filtering",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Statistics from a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Pages fetched
    pub pages_fetched: usize,
    /// Videos read across all pages
    pub videos_seen: usize,
    /// Videos that passed the matcher
    pub videos_matched: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Record fetched pages and the videos they held
    pub fn add_pages(&mut self, pages: usize, videos: usize) {
        self.pages_fetched += pages;
        self.videos_seen += videos;
    }

    /// Record matched videos
    pub fn add_matched(&mut self, count: usize) {
        self.videos_matched += count;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
