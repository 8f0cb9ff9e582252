//! Page fetcher backed by the HTTP API

use super::types::{PageFetcher, PageRequest};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::Page;
use async_trait::async_trait;
use tracing::debug;

/// Fetches pages of a collection endpoint with a bearer token
#[derive(Clone)]
pub struct ApiPageFetcher {
    client: HttpClient,
    endpoint: String,
    token: String,
}

impl ApiPageFetcher {
    /// Create a fetcher for `endpoint` (relative to the client's base URL)
    pub fn new(client: HttpClient, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    /// The collection endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve a server cursor, refusing any origin other than the API's
    ///
    /// The bearer token only ever goes to the configured base URL.
    fn cursor_url(&self, cursor: &str) -> Result<url::Url> {
        let url = self
            .client
            .build_url(cursor)
            .map_err(|e| Error::malformed(format!("invalid next page cursor {cursor}: {e}")))?;
        let base = self.client.build_url("/")?;
        if url.origin() != base.origin() {
            return Err(Error::malformed(format!(
                "next page cursor points to another origin: {}",
                url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }
}

#[async_trait]
impl PageFetcher for ApiPageFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<Page> {
        debug!("Fetching {request}");
        let config = RequestConfig::new().bearer(&self.token);

        let page: Page = match request {
            PageRequest::Number { page, per_page } => {
                let config = config
                    .query("page", page.to_string())
                    .query("per_page", per_page.to_string());
                self.client
                    .get_json_with_config(&self.endpoint, config)
                    .await?
            }
            PageRequest::Cursor(cursor) => {
                let url = self.cursor_url(cursor)?;
                self.client
                    .get_json_with_config(url.as_str(), config)
                    .await?
            }
        };

        debug!("Fetched {request}: {} items", page.data.len());
        Ok(page)
    }
}

impl std::fmt::Debug for ApiPageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiPageFetcher")
            .field("client", &self.client)
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
