//! Pagination module
//!
//! Supports: Page Count (concurrent), Next URL (sequential)
//!
//! # Overview
//!
//! A [`Paginator`] drives a [`PageFetcher`] until the whole collection has
//! been read. The fetcher is the only part that touches the network, so
//! tests substitute an in-memory fetcher without a mock server.

mod fetcher;
mod strategies;
mod types;

pub use fetcher::ApiPageFetcher;
pub use strategies::{paginator_for, NextUrlPaginator, PageCountPaginator};
pub use types::{remaining_pages, PageFetcher, PageRequest, Paginator};

#[cfg(test)]
mod tests;
