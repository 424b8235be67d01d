//! Remote catalog access.
//!
//! # Architecture
//!
//! - The remote catalog is the source of truth for items - NO local sync,
//!   direct API calls
//! - Consumers depend on the [`RemoteCatalogClient`] capability trait and are
//!   generic over it; [`HttpCatalogClient`] is the production implementation
//! - In-memory caching via `moka` for item details (5 minute TTL)

mod http;
mod types;
mod wire;

pub use http::HttpCatalogClient;
pub use types::{CatalogItemDetail, CatalogItemSummary, CatalogPage, TypeTag};

use thiserror::Error;

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status with a body snippet for diagnostics.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the remote.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Malformed endpoint or detail reference.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Opaque paged-fetch capability over the remote catalog.
///
/// Every call is a suspension point; implementations must be safe to share
/// across tasks.
#[allow(async_fn_in_trait)]
pub trait RemoteCatalogClient: Send + Sync {
    /// Fetch one page of the catalog list.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure, non-success status, or
    /// a malformed payload.
    async fn fetch_page(&self, limit: u32, offset: u32) -> Result<CatalogPage, RemoteError>;

    /// Fetch full detail for one item, addressed by its detail reference
    /// (the `url` of a [`CatalogItemSummary`]).
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] on transport failure, non-success status, or
    /// a malformed payload.
    async fn fetch_item_detail(&self, detail_ref: &str) -> Result<CatalogItemDetail, RemoteError>;
}
