//! Pagination types and traits
//!
//! Defines the page fetch abstraction and the paginator interface used by
//! all strategies.

use crate::error::{Error, Result};
use crate::types::Page;
use async_trait::async_trait;
use std::fmt;

/// Describes which page to fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRequest {
    /// A numbered page (1-based)
    Number {
        /// Page number
        page: u32,
        /// Items per page
        per_page: u32,
    },
    /// An opaque next-page location returned by the server
    Cursor(String),
}

impl PageRequest {
    /// Create a numbered page request
    pub fn number(page: u32, per_page: u32) -> Self {
        Self::Number { page, per_page }
    }

    /// Create a cursor request
    pub fn cursor(cursor: impl Into<String>) -> Self {
        Self::Cursor(cursor.into())
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { page, per_page } => write!(f, "page {page} (per_page={per_page})"),
            Self::Cursor(cursor) => write!(f, "cursor {cursor}"),
        }
    }
}

/// Fetches a single page
///
/// Implementations must be side-effect free so pages can be fetched
/// concurrently and in any order.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the described page
    async fn fetch(&self, request: &PageRequest) -> Result<Page>;
}

/// Core trait for pagination strategies
#[async_trait]
pub trait Paginator: Send + Sync {
    /// Fetch every page of the collection
    ///
    /// Pages are returned in page order. Any failed fetch fails the whole
    /// call; no partial result is returned.
    async fn fetch_all(&self, fetcher: &dyn PageFetcher) -> Result<Vec<Page>>;
}

/// Number of pages left after the first one
///
/// `ceil((total - page_size) / page_size)` when `total` exceeds one page,
/// otherwise zero. A total needing more pages than a `u32` can number is a
/// malformed response.
pub fn remaining_pages(total: u64, page_size: u32) -> Result<u32> {
    let page_size = u64::from(page_size.max(1));
    if total <= page_size {
        return Ok(0);
    }
    let remaining = (total - page_size).div_ceil(page_size);
    u32::try_from(remaining)
        .map_err(|_| Error::malformed(format!("total {total} needs {remaining} more pages")))
}
