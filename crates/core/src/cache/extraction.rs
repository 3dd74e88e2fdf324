//! Typed view over a `CacheStore`.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::detail::DetailRecord;
use crate::listing::SummaryRecord;
use crate::metrics::{CACHE_KEYS_EVICTED, CACHE_LOOKUPS};

use super::keys::{
    book_key, search_results_key, LAST_SEARCH_KEY, NAMESPACE_PATTERNS, RECENT_SEARCHES_KEY,
    SINGLETON_KEYS,
};
use super::{CacheError, CacheStore};

/// Maximum simultaneous deletions during a cache clear.
pub const CACHE_CLEAR_CONCURRENCY: usize = 50;

/// Memoized search results, detail records and search history.
#[derive(Clone)]
pub struct ExtractionCache {
    store: Arc<dyn CacheStore>,
}

impl std::fmt::Debug for ExtractionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionCache")
            .field("store", &"<store>")
            .finish()
    }
}

impl ExtractionCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Memoized results for a search, if any.
    pub async fn search_results(
        &self,
        query: &str,
    ) -> Result<Option<Vec<SummaryRecord>>, CacheError> {
        let cached = self.get_json(&search_results_key(query)).await?;
        record_lookup("search", cached.is_some());
        Ok(cached)
    }

    pub async fn store_search_results(
        &self,
        query: &str,
        records: &[SummaryRecord],
    ) -> Result<(), CacheError> {
        self.set_json(&search_results_key(query), &records).await
    }

    /// Memoized detail record for an item, if any.
    pub async fn book(&self, item_id: &str) -> Result<Option<DetailRecord>, CacheError> {
        let cached = self.get_json(&book_key(item_id)).await?;
        record_lookup("book", cached.is_some());
        Ok(cached)
    }

    pub async fn store_book(&self, item_id: &str, record: &DetailRecord) -> Result<(), CacheError> {
        self.set_json(&book_key(item_id), record).await
    }

    /// Stored search history, oldest first; empty when never written.
    pub async fn recent_searches(&self) -> Result<Vec<String>, CacheError> {
        Ok(self
            .get_json(RECENT_SEARCHES_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn store_recent_searches(&self, searches: &[String]) -> Result<(), CacheError> {
        self.set_json(RECENT_SEARCHES_KEY, &searches).await
    }

    pub async fn last_search(&self) -> Result<Option<String>, CacheError> {
        self.get_json(LAST_SEARCH_KEY).await
    }

    pub async fn store_last_search(&self, query: &str) -> Result<(), CacheError> {
        self.set_json(LAST_SEARCH_KEY, &query).await
    }

    /// Delete every key this tool owns and nothing else.
    ///
    /// Returns the number of memoized entries evicted; the two singleton
    /// keys are always removed as well.
    pub async fn clear(&self) -> Result<usize, CacheError> {
        let mut keys = Vec::new();
        for pattern in NAMESPACE_PATTERNS {
            keys.extend(self.store.keys(pattern).await?);
        }
        let evicted = keys.len();
        keys.extend(SINGLETON_KEYS.iter().map(|k| k.to_string()));

        debug!(keys = keys.len(), "Clearing cache");

        stream::iter(keys)
            .map(|key| async move { self.store.del(&key).await })
            .buffer_unordered(CACHE_CLEAR_CONCURRENCY)
            .try_collect::<Vec<()>>()
            .await?;

        CACHE_KEYS_EVICTED.inc_by(evicted as u64);
        info!(evicted, "Cache cleared");
        Ok(evicted)
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| CacheError::Serialization {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value).map_err(|e| CacheError::Serialization {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(key, &raw).await
    }
}

fn record_lookup(namespace: &str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    debug!(namespace, result, "Cache lookup");
    CACHE_LOOKUPS.with_label_values(&[namespace, result]).inc();
}
