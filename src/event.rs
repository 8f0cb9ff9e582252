//! Invocation event
//!
//! The host hands the sync a JSON event:
//!
//! ```json
//! { "token": "...", "tags": "bethel, bumper", "auth": { "key": "...", "secret": "..." } }
//! ```
//!
//! `auth` is accepted for compatibility with existing callers and is not
//! used by the sync.

use crate::error::{Error, Result};
use crate::matcher::TagSet;
use serde::{Deserialize, Serialize};

/// Raw invocation event
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Bearer token for the video API
    #[serde(default)]
    pub token: Option<String>,

    /// Comma-separated tag names
    #[serde(default)]
    pub tags: Option<String>,

    /// Client credentials, ignored by the sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<EventAuth>,
}

impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("tags", &self.tags)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Client credentials carried by an event
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAuth {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
}

impl std::fmt::Debug for EventAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventAuth")
            .field("key", &self.key)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A validated event
#[derive(Clone)]
pub struct SyncRequest {
    /// Bearer token for the video API
    pub token: String,
    /// Requested tags
    pub tags: TagSet,
}

impl std::fmt::Debug for SyncRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRequest")
            .field("token", &"<redacted>")
            .field("tags", &self.tags)
            .finish()
    }
}

impl Event {
    /// Create an event from a token and a comma-separated tag list
    pub fn new(token: impl Into<String>, tags: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            tags: Some(tags.into()),
            auth: None,
        }
    }

    /// Parse an event from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid_input("event", format!("not a valid event: {e}")))
    }

    /// Validate the event and derive the tag set
    pub fn parse(&self) -> Result<SyncRequest> {
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::invalid_input("token", "missing or blank"))?;

        let raw_tags = self
            .tags
            .as_deref()
            .ok_or_else(|| Error::invalid_input("tags", "missing"))?;
        let tags = TagSet::parse(raw_tags);
        if tags.is_empty() {
            return Err(Error::invalid_input(
                "tags",
                format!("no tag names in {raw_tags:?}"),
            ));
        }

        Ok(SyncRequest {
            token: token.to_string(),
            tags,
        })
    }
}
