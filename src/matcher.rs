//! Tag and visibility matching
//!
//! A video is kept when it is publicly viewable and at least one of its
//! tags appears in the caller's tag set. Comparison is case-insensitive.

use crate::types::Video;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a video's tags are compared against the requested tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// A video tag matches when it equals one of the requested tags
    #[default]
    Exact,
    /// A video tag matches when it occurs anywhere in the comma-joined
    /// requested tags, so `be` matches a request for `bethel`
    Substring,
}

/// Case-folded set of requested tag names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: BTreeSet<String>,
    // Comma-joined in request order, used by `MatchMode::Substring`
    joined: String,
}

impl TagSet {
    /// Parse a comma-separated tag list
    ///
    /// Elements are trimmed and lowercased; empty elements are dropped.
    pub fn parse(raw: &str) -> Self {
        Self::from_tags(raw.split(','))
    }

    /// Build a tag set from individual tag names
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ordered: Vec<String> = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        let joined = ordered.join(",");
        Self {
            tags: ordered.into_iter().collect(),
            joined,
        }
    }

    /// Whether the set holds no tags
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the (already lowercased) tag is in the set
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Iterate over the tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

/// Video predicate over a tag set
#[derive(Debug, Clone)]
pub struct Matcher {
    tags: TagSet,
    mode: MatchMode,
}

impl Matcher {
    /// Create an exact matcher
    pub fn new(tags: TagSet) -> Self {
        Self::with_mode(tags, MatchMode::Exact)
    }

    /// Create a matcher with a specific mode
    pub fn with_mode(tags: TagSet, mode: MatchMode) -> Self {
        Self { tags, mode }
    }

    /// The requested tags
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Whether the video should be kept
    pub fn matches(&self, video: &Video) -> bool {
        if !video.is_public() {
            return false;
        }

        video.tags.iter().any(|tag| {
            let name = tag.name.trim().to_lowercase();
            if name.is_empty() {
                return false;
            }
            match self.mode {
                MatchMode::Exact => self.tags.contains(&name),
                MatchMode::Substring => self.tags.joined.contains(&name),
            }
        })
    }

    /// Keep the matching videos, preserving order
    pub fn filter(&self, videos: impl IntoIterator<Item = Video>) -> Vec<Video> {
        videos.into_iter().filter(|v| self.matches(v)).collect()
    }
}
