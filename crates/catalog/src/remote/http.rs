//! HTTP implementation of the remote catalog capability.
//!
//! Item details are immutable upstream, so they are cached with `moka`
//! (5-minute TTL); list pages are not cached - the loader already
//! accumulates them.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use super::wire::{DetailEnvelope, PageEnvelope};
use super::{CatalogItemDetail, CatalogPage, RemoteCatalogClient, RemoteError};
use crate::config::ExplorerConfig;

/// Detail cache TTL.
const DETAIL_CACHE_TTL: Duration = Duration::from_secs(300);
/// Detail cache capacity.
const DETAIL_CACHE_CAPACITY: u64 = 1000;
/// Body snippet length kept in `RemoteError::Status`.
const BODY_SNIPPET_LEN: usize = 200;

/// Client for the remote catalog REST API.
#[derive(Clone)]
pub struct HttpCatalogClient {
    inner: Arc<HttpCatalogClientInner>,
}

struct HttpCatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    detail_cache: Cache<String, CatalogItemDetail>,
}

impl HttpCatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Url` if the configured base URL is malformed,
    /// or `RemoteError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ExplorerConfig) -> Result<Self, RemoteError> {
        let base_url = Url::parse(&config.api_base_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let detail_cache = Cache::builder()
            .max_capacity(DETAIL_CACHE_CAPACITY)
            .time_to_live(DETAIL_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(HttpCatalogClientInner {
                client,
                base_url,
                detail_cache,
            }),
        })
    }

    /// Issue a GET and return the body after status triage.
    async fn get_text(&self, url: Url) -> Result<String, RemoteError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(RemoteError::RateLimited(retry_after));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(url.to_string()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            let snippet = body_snippet(&body);
            tracing::error!(
                status = %status,
                body = %snippet,
                "remote catalog returned non-success status"
            );
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

/// Truncate a diagnostic body to [`BODY_SNIPPET_LEN`] characters.
fn body_snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

impl RemoteCatalogClient for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<CatalogPage, RemoteError> {
        let mut url = self.inner.base_url.join("pokemon")?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());

        let body = self.get_text(url).await?;
        let envelope: PageEnvelope = serde_json::from_str(&body)?;

        Ok(CatalogPage::from(envelope))
    }

    #[instrument(skip(self), fields(detail_ref = %detail_ref))]
    async fn fetch_item_detail(&self, detail_ref: &str) -> Result<CatalogItemDetail, RemoteError> {
        if let Some(detail) = self.inner.detail_cache.get(detail_ref).await {
            debug!("cache hit for item detail");
            return Ok(detail);
        }

        let url = Url::parse(detail_ref)?;
        let body = self.get_text(url).await?;
        let envelope: DetailEnvelope = serde_json::from_str(&body)?;
        let detail = CatalogItemDetail::from(envelope);

        self.inner
            .detail_cache
            .insert(detail_ref.to_owned(), detail.clone())
            .await;

        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_snippet_truncates_long_bodies() {
        let long = "x".repeat(BODY_SNIPPET_LEN + 50);
        assert_eq!(body_snippet(&long).chars().count(), BODY_SNIPPET_LEN);
    }

    #[test]
    fn body_snippet_keeps_short_bodies_whole() {
        assert_eq!(body_snippet("not json"), "not json");
    }
}
