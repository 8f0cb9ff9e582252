//! Common types used throughout video-tag-sync
//!
//! Wire shapes of the remote video API. Fields this crate does not
//! interpret are kept in `extra` so videos pass through unmodified.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Privacy view value marking a video as publicly viewable
pub const PUBLIC_VIEW: &str = "anybody";

// ============================================================================
// Video
// ============================================================================

/// A single video as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Video title
    pub name: String,

    /// Tags attached to the video (absent is treated as empty)
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Visibility metadata (absent is treated as public)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,

    /// Every other field, passed through untouched
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Video {
    /// Create a video with a name and tag names, no privacy metadata
    pub fn new<I, S>(name: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            tags: tags.into_iter().map(Tag::new).collect(),
            privacy: None,
            extra: JsonObject::new(),
        }
    }

    /// Set the privacy view
    #[must_use]
    pub fn with_privacy(mut self, view: impl Into<String>) -> Self {
        self.privacy = Some(Privacy {
            view: Some(view.into()),
            extra: JsonObject::new(),
        });
        self
    }

    /// Whether the video is publicly viewable
    ///
    /// A video without privacy metadata, or without a `view` value, counts
    /// as public.
    pub fn is_public(&self) -> bool {
        match self.privacy.as_ref().and_then(|p| p.view.as_deref()) {
            Some(view) => view == PUBLIC_VIEW,
            None => true,
        }
    }
}

/// A tag attached to a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name as entered by the uploader
    pub name: String,

    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Tag {
    /// Create a tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: JsonObject::new(),
        }
    }
}

/// Visibility metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privacy {
    /// Who can view the video (e.g. "anybody", "unlisted", "nobody")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

// ============================================================================
// Page
// ============================================================================

/// One page of a paginated collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Total number of items in the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Items on this page
    pub data: Vec<Video>,

    /// Paging links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl Page {
    /// Create a page of videos
    pub fn new(data: Vec<Video>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Set the declared total count
    #[must_use]
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Set the next-page cursor
    #[must_use]
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.paging = Some(Paging {
            next: Some(next.into()),
        });
        self
    }

    /// The next-page cursor, if the server reported one
    ///
    /// An empty string is treated the same as `null`.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}

/// Paging links of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Location of the next page, `null` on the last page
    #[serde(default)]
    pub next: Option<String>,
}
