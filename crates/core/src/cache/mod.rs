//! Extraction cache.
//!
//! A plain key-value `CacheStore` (SQLite on disk, or in memory) plus the
//! typed `ExtractionCache` that owns the key namespaces: memoized search
//! results, memoized detail records and the recent-search list.
//!
//! Entries never expire; once written they are authoritative until cleared.

mod extraction;
mod keys;
mod memory;
mod recent;
mod sqlite;

pub use extraction::{ExtractionCache, CACHE_CLEAR_CONCURRENCY};
pub use keys::*;
pub use memory::MemoryCacheStore;
pub use recent::RecentSearches;
pub use sqlite::SqliteCacheStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors for cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error for key {key}: {message}")]
    Serialization { key: String, message: String },

    #[error("Cache lock poisoned")]
    LockPoisoned,
}

/// Key-value store backing the extraction cache.
///
/// No transactional guarantees: concurrent writers to the same key are
/// last-write-wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn del(&self, key: &str) -> Result<(), CacheError>;

    /// All keys matching a glob pattern (`*` any run, `?` one character).
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError>;
}
