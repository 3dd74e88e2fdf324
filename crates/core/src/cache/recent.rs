//! Search history.

use super::{CacheError, ExtractionCache};

/// Every search of the session, oldest first.
///
/// Loaded once at session start and saved once at session end. The stored
/// list is append-only; duplicates are only collapsed for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub async fn load(cache: &ExtractionCache) -> Result<Self, CacheError> {
        Ok(Self::new(cache.recent_searches().await?))
    }

    pub async fn save(&self, cache: &ExtractionCache) -> Result<(), CacheError> {
        cache.store_recent_searches(&self.entries).await
    }

    /// Record a search. Blank text is ignored.
    pub fn push(&mut self, text: &str) {
        if !text.trim().is_empty() {
            self.entries.push(text.to_string());
        }
    }

    /// Raw history, oldest first, duplicates included.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Distinct searches, newest first, at most `limit`.
    ///
    /// Duplicates collapse onto their first occurrence before the order is
    /// reversed.
    pub fn display(&self, limit: usize) -> Vec<String> {
        let mut unique: Vec<&String> = Vec::new();
        for entry in &self.entries {
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }

        unique
            .into_iter()
            .rev()
            .filter(|entry| !entry.is_empty())
            .take(limit)
            .cloned()
            .collect()
    }
}
