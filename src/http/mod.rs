//! HTTP client module
//!
//! Provides the HTTP client used to fetch pages from the video API.
//!
//! # Features
//!
//! - **Bearer Authentication**: Per-request access tokens
//! - **Timeouts**: Client-wide default with per-request override
//! - **Error Classification**: Status, timeout and malformed-body errors

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
