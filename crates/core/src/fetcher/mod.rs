//! Page fetching.
//!
//! This module provides a `PageFetcher` trait for pulling raw HTML from the
//! source site, plus the reqwest-backed implementation.

mod http;

pub use http::HttpPageFetcher;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while fetching a page.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Source of raw page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `path` (relative to the site root) with the given query parameters.
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<String, FetchError>;
}
