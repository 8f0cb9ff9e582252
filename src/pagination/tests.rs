//! Tests for pagination module

use super::*;
use crate::config::{PaginationStrategy, SyncConfig};
use crate::error::{Error, ErrorKind, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{Page, Video};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Fetcher
// ============================================================================

/// In-memory fetcher that records every request
#[derive(Default)]
struct StubFetcher {
    pages: HashMap<PageRequest, Page>,
    delays: HashMap<PageRequest, Duration>,
    failing: Option<PageRequest>,
    calls: Mutex<Vec<PageRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubFetcher {
    fn with_page(mut self, request: PageRequest, page: Page) -> Self {
        self.pages.insert(request, page);
        self
    }

    fn with_delay(mut self, request: PageRequest, delay: Duration) -> Self {
        self.delays.insert(request, delay);
        self
    }

    fn failing_on(mut self, request: PageRequest) -> Self {
        self.failing = Some(request);
        self
    }

    fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<Page> {
        self.calls.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(request) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.as_ref() == Some(request) {
            return Err(Error::http_status(500, "boom"));
        }
        self.pages
            .get(request)
            .cloned()
            .ok_or_else(|| Error::http_status(404, format!("no page for {request}")))
    }
}

fn videos(prefix: &str, count: usize) -> Vec<Video> {
    (0..count)
        .map(|i| Video::new(format!("{prefix}-{i}"), ["tag"]))
        .collect()
}

fn names(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| p.data.iter().map(|v| v.name.clone()))
        .collect()
}

/// Fetcher serving a `total`-item collection in pages of `page_size`
fn counted_collection(total: usize, page_size: u32) -> StubFetcher {
    let page_count = total.div_ceil(page_size as usize).max(1);
    let mut fetcher = StubFetcher::default();
    for page in 1..=page_count {
        let start = (page - 1) * page_size as usize;
        let count = (total - start).min(page_size as usize);
        let request = PageRequest::number(page as u32, page_size);
        fetcher = fetcher.with_page(
            request,
            Page::new(videos(&format!("p{page}"), count)).with_total(total as u64),
        );
    }
    fetcher
}

// ============================================================================
// PageRequest Tests
// ============================================================================

#[test]
fn test_page_request_display() {
    assert_eq!(
        PageRequest::number(2, 50).to_string(),
        "page 2 (per_page=50)"
    );
    assert_eq!(
        PageRequest::cursor("/me/videos?page=3").to_string(),
        "cursor /me/videos?page=3"
    );
}

// ============================================================================
// Page Arithmetic Tests
// ============================================================================

#[test_case(0, 50, 0 ; "empty collection")]
#[test_case(6, 50, 0 ; "single partial page")]
#[test_case(50, 50, 0 ; "exactly one page")]
#[test_case(51, 50, 1 ; "one item over")]
#[test_case(100, 50, 1 ; "exactly two pages")]
#[test_case(230, 50, 4 ; "five pages")]
#[test_case(7, 1, 6 ; "page size one")]
fn test_remaining_pages(total: u64, page_size: u32, expected: u32) {
    assert_eq!(remaining_pages(total, page_size).unwrap(), expected);
}

#[test_case(214_748_364_850, 50 ; "wraps when truncated")]
#[test_case(1 << 32, 1 ; "one past u32 max")]
#[test_case(u64::MAX, 1 ; "max total")]
fn test_remaining_pages_oversized_total(total: u64, page_size: u32) {
    let err = remaining_pages(total, page_size).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test]
fn test_remaining_pages_largest_count() {
    assert_eq!(remaining_pages(1 << 32, 2).unwrap(), (1 << 31) - 1);
    assert_eq!(remaining_pages(u64::from(u32::MAX), 1).unwrap(), u32::MAX - 1);
}

// ============================================================================
// PageCountPaginator Tests
// ============================================================================

#[tokio::test]
async fn test_page_count_single_page() {
    let fetcher = counted_collection(6, 50);
    let pages = PageCountPaginator::new(50).fetch_all(&fetcher).await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(fetcher.calls(), vec![PageRequest::number(1, 50)]);
}

#[tokio::test]
async fn test_page_count_fetches_every_page_once() {
    let fetcher = counted_collection(230, 50);
    let pages = PageCountPaginator::new(50).fetch_all(&fetcher).await.unwrap();

    assert_eq!(pages.len(), 5);
    assert_eq!(names(&pages).len(), 230);

    let mut calls = fetcher.calls();
    calls.sort_by_key(|r| r.to_string());
    assert_eq!(
        calls,
        (1..=5)
            .map(|p| PageRequest::number(p, 50))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_page_count_preserves_page_order() {
    // Page 2 finishes last but must still come second
    let fetcher = counted_collection(3, 1)
        .with_delay(PageRequest::number(2, 1), Duration::from_millis(100));

    let pages = PageCountPaginator::new(1).fetch_all(&fetcher).await.unwrap();

    assert_eq!(names(&pages), vec!["p1-0", "p2-0", "p3-0"]);
}

#[tokio::test]
async fn test_page_count_runs_pages_concurrently() {
    let mut fetcher = counted_collection(4, 1);
    for page in 2..=4 {
        fetcher = fetcher.with_delay(PageRequest::number(page, 1), Duration::from_millis(50));
    }

    PageCountPaginator::new(1).fetch_all(&fetcher).await.unwrap();
    assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_page_count_max_concurrency() {
    let mut fetcher = counted_collection(6, 1);
    for page in 2..=6 {
        fetcher = fetcher.with_delay(PageRequest::number(page, 1), Duration::from_millis(20));
    }

    let pages = PageCountPaginator::new(1)
        .with_max_concurrency(2)
        .fetch_all(&fetcher)
        .await
        .unwrap();

    assert_eq!(pages.len(), 6);
    assert!(fetcher.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_page_count_fails_on_any_page() {
    let fetcher = counted_collection(150, 50).failing_on(PageRequest::number(2, 50));

    let err = PageCountPaginator::new(50)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_page_count_first_page_failure() {
    let fetcher = StubFetcher::default();
    let err = PageCountPaginator::new(50)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(fetcher.calls().len(), 1);
}

#[tokio::test]
async fn test_page_count_requires_total() {
    let fetcher = StubFetcher::default()
        .with_page(PageRequest::number(1, 50), Page::new(videos("p1", 2)));

    let err = PageCountPaginator::new(50)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test_case(u64::MAX ; "max total")]
#[test_case(214_748_364_850 ; "total beyond page numbering")]
#[tokio::test]
async fn test_page_count_rejects_oversized_total(total: u64) {
    let fetcher = StubFetcher::default().with_page(
        PageRequest::number(1, 50),
        Page::new(videos("p1", 50)).with_total(total),
    );

    let err = PageCountPaginator::new(50)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(fetcher.calls(), vec![PageRequest::number(1, 50)]);
}

#[tokio::test]
async fn test_page_count_last_page_number_overflow() {
    // u32::MAX remaining pages would need page number u32::MAX + 1
    let fetcher = StubFetcher::default().with_page(
        PageRequest::number(1, 1),
        Page::new(videos("p1", 1)).with_total(u64::from(u32::MAX) + 1),
    );

    let err = PageCountPaginator::new(1)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(fetcher.calls().len(), 1);
}

// ============================================================================
// NextUrlPaginator Tests
// ============================================================================

#[tokio::test]
async fn test_next_url_follows_cursor() {
    let fetcher = StubFetcher::default()
        .with_page(
            PageRequest::number(1, 2),
            Page::new(videos("p1", 2)).with_next("/me/videos?page=2&per_page=2"),
        )
        .with_page(
            PageRequest::cursor("/me/videos?page=2&per_page=2"),
            Page::new(videos("p2", 2)).with_next("/me/videos?page=3&per_page=2"),
        )
        .with_page(
            PageRequest::cursor("/me/videos?page=3&per_page=2"),
            Page::new(videos("p3", 1)),
        );

    let pages = NextUrlPaginator::new(2).fetch_all(&fetcher).await.unwrap();

    assert_eq!(names(&pages), vec!["p1-0", "p1-1", "p2-0", "p2-1", "p3-0"]);
    assert_eq!(
        fetcher.calls(),
        vec![
            PageRequest::number(1, 2),
            PageRequest::cursor("/me/videos?page=2&per_page=2"),
            PageRequest::cursor("/me/videos?page=3&per_page=2"),
        ]
    );
}

#[tokio::test]
async fn test_next_url_single_page_without_total() {
    let fetcher = StubFetcher::default()
        .with_page(PageRequest::number(1, 50), Page::new(videos("p1", 3)));

    let pages = NextUrlPaginator::new(50).fetch_all(&fetcher).await.unwrap();
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_next_url_repeated_cursor() {
    let fetcher = StubFetcher::default()
        .with_page(
            PageRequest::number(1, 50),
            Page::new(videos("p1", 1)).with_next("/loop"),
        )
        .with_page(
            PageRequest::cursor("/loop"),
            Page::new(videos("loop", 1)).with_next("/loop"),
        );

    let err = NextUrlPaginator::new(50)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(fetcher.calls().len(), 2);
}

#[tokio::test]
async fn test_next_url_stops_on_failure() {
    let fetcher = StubFetcher::default()
        .with_page(
            PageRequest::number(1, 50),
            Page::new(videos("p1", 1)).with_next("/page2"),
        )
        .with_page(
            PageRequest::cursor("/page2"),
            Page::new(videos("p2", 1)).with_next("/page3"),
        )
        .failing_on(PageRequest::cursor("/page2"));

    let err = NextUrlPaginator::new(50)
        .fetch_all(&fetcher)
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(fetcher.calls().len(), 2);
}

// ============================================================================
// Factory Tests
// ============================================================================

#[tokio::test]
async fn test_paginator_for_strategy() {
    // Both strategies read the same single-page collection
    let fetcher = counted_collection(3, 50);

    for strategy in [PaginationStrategy::PageCount, PaginationStrategy::NextUrl] {
        let config = SyncConfig::new().with_strategy(strategy);
        let pages = paginator_for(&config).fetch_all(&fetcher).await.unwrap();
        assert_eq!(names(&pages), vec!["p1-0", "p1-1", "p1-2"]);
    }
}

// ============================================================================
// ApiPageFetcher Tests
// ============================================================================

fn api_fetcher(server: &MockServer) -> ApiPageFetcher {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    let client = HttpClient::with_config(config).unwrap();
    ApiPageFetcher::new(client, "/me/videos", "t0ken")
}

#[tokio::test]
async fn test_api_fetcher_numbered_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/videos"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "50"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 51,
            "data": [{"name": "Late", "tags": [{"name": "bethel"}]}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = api_fetcher(&mock_server)
        .fetch(&PageRequest::number(2, 50))
        .await
        .unwrap();

    assert_eq!(page.total, Some(51));
    assert_eq!(page.data[0].name, "Late");
}

#[tokio::test]
async fn test_api_fetcher_absolute_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/next"))
        .and(query_param("token", "abc"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cursor = format!("{}/next?token=abc", mock_server.uri());
    let page = api_fetcher(&mock_server)
        .fetch(&PageRequest::cursor(cursor))
        .await
        .unwrap();

    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_api_fetcher_relative_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/videos"))
        .and(query_param("page", "2"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = api_fetcher(&mock_server)
        .fetch(&PageRequest::cursor("/me/videos?page=2&per_page=50"))
        .await
        .unwrap();

    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_api_fetcher_rejects_cross_origin_cursor() {
    let api_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&other_server)
        .await;

    let cursor = format!("{}/me/videos?page=2", other_server.uri());
    let err = api_fetcher(&api_server)
        .fetch(&PageRequest::cursor(cursor))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(err.to_string().contains("another origin"));
}

#[tokio::test]
async fn test_next_url_stops_at_cross_origin_cursor() {
    let api_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"name": "First"}],
            "paging": {"next": format!("{}/steal", other_server.uri())}
        })))
        .expect(1)
        .mount(&api_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&other_server)
        .await;

    let err = NextUrlPaginator::new(50)
        .fetch_all(&api_fetcher(&api_server))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test_case("http://[bad" ; "unclosed ipv6 host")]
#[test_case("https://" ; "empty host")]
#[tokio::test]
async fn test_api_fetcher_unparseable_cursor(cursor: &str) {
    let mock_server = MockServer::start().await;

    let err = api_fetcher(&mock_server)
        .fetch(&PageRequest::cursor(cursor))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert!(err.to_string().contains("invalid next page cursor"));
}

#[tokio::test]
async fn test_api_fetcher_malformed_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 3})))
        .mount(&mock_server)
        .await;

    let err = api_fetcher(&mock_server)
        .fetch(&PageRequest::number(1, 50))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test]
fn test_api_fetcher_debug_redacts_token() {
    let client = HttpClient::new().unwrap();
    let fetcher = ApiPageFetcher::new(client, "/me/videos", "t0ken");
    let debug = format!("{fetcher:?}");
    assert!(!debug.contains("t0ken"));
    assert_eq!(fetcher.endpoint(), "/me/videos");
}
