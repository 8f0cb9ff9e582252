// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # video-tag-sync
//!
//! Fetches every video a user owns from a paginated video API and keeps
//! the public ones tagged with any of a caller-supplied list of tags.
//!
//! ## Features
//!
//! - **Two Pagination Strategies**: concurrent page-count fetches or
//!   sequential next-link following
//! - **Tag Matching**: case-insensitive exact matching, with an optional
//!   legacy substring mode
//! - **Pass-through Output**: matched videos keep every field the API sent
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use video_tag_sync::{Event, SyncConfig, SyncEngine, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let event = Event::new("access-token", "bethel, bumper");
//!
//!     let mut engine = SyncEngine::new(SyncConfig::default())?;
//!     let videos = engine.run(&event).await?;
//!
//!     for video in &videos {
//!         println!("{}", video.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Event ──parse──▶ SyncRequest { token, TagSet }
//!                        │
//!          ┌─────────────┴─────────────┐
//!          │  Paginator (PageCount |   │──▶ PageFetcher ──▶ HttpClient
//!          │            NextUrl)       │
//!          └─────────────┬─────────────┘
//!                        │ Vec<Page>
//!                        ▼
//!                  Matcher ──▶ Vec<Video>
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// API wire types
pub mod types;

/// Sync configuration
pub mod config;

/// Invocation event parsing
pub mod event;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Tag and visibility matching
pub mod matcher;

/// Sync engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{PaginationStrategy, SyncConfig};
pub use engine::{run, SyncEngine, SyncState, SyncStats};
pub use error::{Error, ErrorKind, Result};
pub use event::{Event, SyncRequest};
pub use matcher::{MatchMode, Matcher, TagSet};
pub use types::{Page, Privacy, Tag, Video};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
