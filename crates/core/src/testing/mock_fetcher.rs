//! Mock page fetcher for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, PageFetcher};

/// A recorded fetch for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// Mock implementation of the PageFetcher trait.
///
/// Serves canned HTML keyed by path. Unknown paths answer HTTP 404, which
/// is a fetch failure, not a "Not Found" page.
#[derive(Debug, Clone, Default)]
pub struct MockPageFetcher {
    /// Canned HTML by path.
    pages: Arc<RwLock<HashMap<String, String>>>,
    /// Failures by path; take precedence over pages.
    failures: Arc<RwLock<HashMap<String, FetchError>>>,
    /// Artificial latency by path.
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Every fetch, in call order.
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `path`.
    pub async fn set_page(&self, path: &str, html: impl Into<String>) {
        self.pages.write().await.insert(path.to_string(), html.into());
    }

    /// Fail every fetch of `path` with `error`.
    pub async fn set_failure(&self, path: &str, error: FetchError) {
        self.failures.write().await.insert(path.to_string(), error);
    }

    /// Delay every fetch of `path`.
    pub async fn set_delay(&self, path: &str, delay: Duration) {
        self.delays.write().await.insert(path.to_string(), delay);
    }

    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    pub async fn request_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Highest number of fetches observed running at once.
    pub async fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self, path: &str) -> Result<String, FetchError> {
        let delay = self.delays.read().await.get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.failures.read().await.get(path) {
            return Err(error.clone());
        }

        self.pages
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Http {
                status: 404,
                url: path.to_string(),
            })
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        self.requests.write().await.push(RecordedRequest {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = self.respond(path).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
