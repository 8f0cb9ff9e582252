//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{remaining_pages, PageFetcher, PageRequest, Paginator};
use crate::config::{PaginationStrategy, SyncConfig, DEFAULT_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::types::Page;
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use std::collections::HashSet;
use tracing::debug;

// ============================================================================
// Page Count Pagination
// ============================================================================

/// Total-count pagination with concurrent fetches
///
/// Fetches page 1, reads the declared `total`, then fetches every remaining
/// page concurrently. Output keeps ascending page order whatever order the
/// fetches complete in. The first failure drops all in-flight fetches.
#[derive(Debug, Clone)]
pub struct PageCountPaginator {
    /// Items per page
    pub page_size: u32,
    /// Upper bound on concurrent fetches (unbounded when `None`)
    pub max_concurrency: Option<usize>,
}

impl PageCountPaginator {
    /// Create a new page count paginator
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            max_concurrency: None,
        }
    }

    /// Bound concurrent fetches
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = Some(max);
        self
    }
}

impl Default for PageCountPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[async_trait]
impl Paginator for PageCountPaginator {
    async fn fetch_all(&self, fetcher: &dyn PageFetcher) -> Result<Vec<Page>> {
        let first = fetcher
            .fetch(&PageRequest::number(1, self.page_size))
            .await?;
        let total = first
            .total
            .ok_or_else(|| Error::malformed("first page is missing 'total'"))?;

        let remaining = remaining_pages(total, self.page_size)?;
        debug!(
            "Collection has {total} items, fetching {remaining} more pages of {}",
            self.page_size
        );

        let last_page = remaining
            .checked_add(1)
            .ok_or_else(|| Error::malformed(format!("total {total} needs too many pages")))?;
        let requests: Vec<PageRequest> = (2..=last_page)
            .map(|page| PageRequest::number(page, self.page_size))
            .collect();
        let limit = self
            .max_concurrency
            .unwrap_or(requests.len())
            .max(1);

        let fetches: Vec<_> = requests
            .iter()
            .map(|request| fetcher.fetch(request))
            .collect();
        let rest: Vec<Page> = stream::iter(fetches)
            .buffered(limit)
            .try_collect()
            .await?;

        let mut pages = Vec::with_capacity(rest.len() + 1);
        pages.push(first);
        pages.extend(rest);
        Ok(pages)
    }
}

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Cursor pagination following `paging.next`
///
/// Fetches one page at a time; each response decides whether another page
/// exists. A cursor that comes back twice is treated as a malformed
/// response so no page is fetched more than once per cursor.
#[derive(Debug, Clone)]
pub struct NextUrlPaginator {
    /// Items per page for the first request
    pub page_size: u32,
}

impl NextUrlPaginator {
    /// Create a new next URL paginator
    pub fn new(page_size: u32) -> Self {
        Self { page_size }
    }
}

impl Default for NextUrlPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[async_trait]
impl Paginator for NextUrlPaginator {
    async fn fetch_all(&self, fetcher: &dyn PageFetcher) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        let mut seen = HashSet::new();
        let mut request = PageRequest::number(1, self.page_size);

        loop {
            let page = fetcher.fetch(&request).await?;
            let next = page.next_cursor().map(str::to_string);
            pages.push(page);

            let Some(cursor) = next else {
                break;
            };
            if !seen.insert(cursor.clone()) {
                return Err(Error::malformed(format!(
                    "next page cursor repeated: {cursor}"
                )));
            }
            debug!("Following next page cursor: {cursor}");
            request = PageRequest::Cursor(cursor);
        }

        Ok(pages)
    }
}

/// Build the paginator selected by the config
pub fn paginator_for(config: &SyncConfig) -> Box<dyn Paginator> {
    match config.strategy {
        PaginationStrategy::PageCount => {
            let mut paginator = PageCountPaginator::new(config.page_size);
            paginator.max_concurrency = config.max_concurrency;
            Box::new(paginator)
        }
        PaginationStrategy::NextUrl => Box::new(NextUrlPaginator::new(config.page_size)),
    }
}
