//! Catalog service - one search/lookup session against the source site.
//!
//! Searches and item lookups are served from the extraction cache when
//! memoized, otherwise crawled/fetched and memoized.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::cache::{normalize_query, CacheError, ExtractionCache, RecentSearches};
use crate::config::Config;
use crate::crawler::{CrawlError, PaginationCrawler};
use crate::detail::{parse_detail_page, DetailRecord};
use crate::fetcher::{FetchError, PageFetcher};
use crate::item_id::item_path;
use crate::listing::SummaryRecord;

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Crawl(#[from] CrawlError),

    #[error("Failed to fetch item {item_id}: {source}")]
    Fetch {
        item_id: String,
        #[source]
        source: FetchError,
    },

    #[error("Cache failure: {0}")]
    Cache(#[from] CacheError),
}

/// Search and lookup front door used by callers.
pub struct CatalogService {
    fetcher: Arc<dyn PageFetcher>,
    crawler: PaginationCrawler,
    cache: ExtractionCache,
    base_url: String,
}

impl CatalogService {
    pub fn new(config: &Config, fetcher: Arc<dyn PageFetcher>, cache: ExtractionCache) -> Self {
        Self {
            crawler: PaginationCrawler::new(Arc::clone(&fetcher), &config.crawler),
            fetcher,
            cache,
            base_url: config.site.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn cache(&self) -> &ExtractionCache {
        &self.cache
    }

    /// Search the catalog.
    ///
    /// Blank text returns nothing and is not recorded. "Not Found" is an
    /// empty list; fetch and cache failures are errors.
    pub async fn search(
        &self,
        text: &str,
        recent: &mut RecentSearches,
    ) -> Result<Vec<SummaryRecord>, CatalogError> {
        let query = normalize_query(text);
        if query.is_empty() {
            return Ok(Vec::new());
        }

        recent.push(&query);
        self.cache.store_last_search(&query).await?;

        if let Some(cached) = self.cache.search_results(&query).await? {
            debug!(query = %query, results = cached.len(), "Serving search from cache");
            return Ok(cached);
        }

        let records = self.crawler.search(&query).await?;
        self.cache.store_search_results(&query, &records).await?;

        info!(query = %query, results = records.len(), "Search complete");
        Ok(records)
    }

    /// Full record of one item.
    pub async fn book(&self, item_id: &str) -> Result<DetailRecord, CatalogError> {
        let item_id = item_id.trim();
        if let Some(cached) = self.cache.book(item_id).await? {
            debug!(item_id, "Serving item from cache");
            return Ok(cached);
        }

        let html = self
            .fetcher
            .fetch(&item_path(item_id), &[])
            .await
            .map_err(|source| CatalogError::Fetch {
                item_id: item_id.to_string(),
                source,
            })?;

        let record = parse_detail_page(&html);
        self.cache.store_book(item_id, &record).await?;
        Ok(record)
    }

    /// Text of the most recent search, if any.
    pub async fn last_search(&self) -> Result<Option<String>, CatalogError> {
        Ok(self.cache.last_search().await?)
    }

    /// Evict every memoized entry and the search history.
    pub async fn clear_cache(&self) -> Result<usize, CatalogError> {
        Ok(self.cache.clear().await?)
    }

    /// Browser link of an item.
    pub fn item_url(&self, item_id: &str) -> String {
        format!("{}{}", self.base_url, item_path(item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheStore;
    use crate::testing::fixtures::{self, DetailPage, ListingEntry};
    use crate::testing::MockPageFetcher;

    fn service(fetcher: &MockPageFetcher) -> CatalogService {
        CatalogService::new(
            &Config::default(),
            Arc::new(fetcher.clone()),
            ExtractionCache::new(Arc::new(MemoryCacheStore::new())),
        )
    }

    #[tokio::test]
    async fn test_search_is_memoized() {
        let fetcher = MockPageFetcher::new();
        fetcher
            .set_page(
                "/page/1/",
                fixtures::listing_page(&[ListingEntry::new("Dune", "dune")], None),
            )
            .await;
        let service = service(&fetcher);
        let mut recent = RecentSearches::default();

        let first = service.search("Dune", &mut recent).await.unwrap();
        let second = service.search("dune ", &mut recent).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetcher.request_count().await, 1);
        assert_eq!(recent.entries(), &["dune", "dune"]);
        assert_eq!(service.last_search().await.unwrap().as_deref(), Some("dune"));
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let fetcher = MockPageFetcher::new();
        let service = service(&fetcher);
        let mut recent = RecentSearches::default();

        assert!(service.search("   ", &mut recent).await.unwrap().is_empty());
        assert!(recent.entries().is_empty());
        assert_eq!(fetcher.request_count().await, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_distinct_from_not_found() {
        let fetcher = MockPageFetcher::new();
        fetcher
            .set_page("/page/1/", fixtures::not_found_page())
            .await;
        let service = service(&fetcher);
        let mut recent = RecentSearches::default();

        assert!(service.search("nothing", &mut recent).await.unwrap().is_empty());

        fetcher
            .set_failure("/page/1/", FetchError::Connection("refused".into()))
            .await;
        let err = service.search("other", &mut recent).await.unwrap_err();
        assert!(matches!(err, CatalogError::Crawl(_)));
    }

    #[tokio::test]
    async fn test_book_is_fetched_once() {
        let fetcher = MockPageFetcher::new();
        fetcher
            .set_page(
                "/audio-books/dune/",
                fixtures::detail_page(&DetailPage::new("Dune")),
            )
            .await;
        let service = service(&fetcher);

        let first = service.book("dune").await.unwrap();
        let second = service.book("dune").await.unwrap();

        assert_eq!(first.title, "Dune");
        assert_eq!(first, second);
        assert_eq!(fetcher.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_book_id_is_trimmed_for_fetch_and_cache() {
        let fetcher = MockPageFetcher::new();
        fetcher
            .set_page(
                "/audio-books/dune/",
                fixtures::detail_page(&DetailPage::new("Dune")),
            )
            .await;
        let service = service(&fetcher);

        let padded = service.book(" dune ").await.unwrap();
        let bare = service.book("dune").await.unwrap();

        assert_eq!(padded, bare);
        let requests = fetcher.recorded_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/audio-books/dune/");
    }

    #[tokio::test]
    async fn test_book_fetch_failure() {
        let fetcher = MockPageFetcher::new();
        let service = service(&fetcher);

        let err = service.book("missing").await.unwrap_err();
        match err {
            CatalogError::Fetch { item_id, source } => {
                assert_eq!(item_id, "missing");
                assert!(matches!(source, FetchError::Http { status: 404, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_item_url() {
        let fetcher = MockPageFetcher::new();
        assert_eq!(
            service(&fetcher).item_url("dune"),
            "http://audiobookbay.fi/audio-books/dune/"
        );
    }
}
