//! Cache key policy.
//!
//! Two hashed namespaces and two singleton keys. The cache may be shared
//! with other tools, so clears only ever touch these.

use sha2::{Digest, Sha256};

/// Namespace prefix of memoized search results.
pub const SEARCH_RESULT_PREFIX: &str = "SEARCH_RESULT:";

/// Namespace prefix of memoized detail records.
pub const BOOK_CACHE_PREFIX: &str = "BOOK_CACHE:";

/// Ordered list of every search run.
pub const RECENT_SEARCHES_KEY: &str = "RECENT_SEARCHES";

/// Text of the most recent search.
pub const LAST_SEARCH_KEY: &str = "LAST_SEARCH";

/// Glob patterns covering both hashed namespaces.
pub const NAMESPACE_PATTERNS: [&str; 2] = ["SEARCH_RESULT:*", "BOOK_CACHE:*"];

/// Singleton keys removed by a cache clear.
pub const SINGLETON_KEYS: [&str; 2] = [LAST_SEARCH_KEY, RECENT_SEARCHES_KEY];

/// Trimmed, lowercased search text.
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Key of the memoized results for a search.
pub fn search_results_key(query: &str) -> String {
    format!("{}{}", SEARCH_RESULT_PREFIX, hash_text(&normalize_query(query)))
}

/// Key of the memoized detail record for an item.
pub fn book_key(item_id: &str) -> String {
    format!("{}{}", BOOK_CACHE_PREFIX, hash_text(item_id.trim()))
}

fn hash_text(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
