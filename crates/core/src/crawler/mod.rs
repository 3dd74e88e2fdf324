//! Pagination crawler.
//!
//! Fetches page 1 of a search, reads its pager, then pulls the remaining
//! pages with bounded concurrency. Records are appended as pages complete,
//! so groups from later pages may land before earlier ones.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::CrawlerConfig;
use crate::fetcher::{FetchError, PageFetcher};
use crate::listing::{parse_listing_page, ListingPage, SummaryRecord};
use crate::metrics::{LISTING_PAGES_FETCHED, SUMMARY_RECORDS_EXTRACTED};

/// Query parameter carrying the search text.
pub const SEARCH_PARAM: &str = "s";

/// Errors that abort a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Failed to fetch results page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: FetchError,
    },
}

/// Path of a search-results page.
pub fn listing_path(page: u32) -> String {
    format!("/page/{}/", page)
}

/// Crawls every page of a search.
pub struct PaginationCrawler {
    fetcher: Arc<dyn PageFetcher>,
    max_parallel_pages: usize,
}

impl PaginationCrawler {
    /// Create a crawler using the configured page-fetch concurrency.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlerConfig) -> Self {
        Self::with_max_parallel_pages(fetcher, config.max_parallel_pages)
    }

    /// Create a crawler with an explicit page-fetch concurrency (minimum 1).
    pub fn with_max_parallel_pages(fetcher: Arc<dyn PageFetcher>, max_parallel_pages: usize) -> Self {
        Self {
            fetcher,
            max_parallel_pages: max_parallel_pages.max(1),
        }
    }

    /// Run a search and collect the records of every result page.
    ///
    /// A "Not Found" first page yields an empty list. The first page that
    /// fails to fetch aborts the crawl; pages still in flight are dropped.
    pub async fn search(&self, query: &str) -> Result<Vec<SummaryRecord>, CrawlError> {
        let query = query.to_lowercase();

        let Some(first) = self.fetch_page(&query, 1).await? else {
            info!(query = %query, "No results");
            return Ok(Vec::new());
        };

        let total_pages = first.pagination.total_pages;
        let records = first.records;
        info!(
            "Retrieved page 1/{} ({} items)",
            total_pages.max(1),
            records.len()
        );

        if total_pages <= 1 {
            return Ok(records);
        }

        debug!(
            query = %query,
            total_pages,
            max_parallel = self.max_parallel_pages,
            "Fetching remaining pages"
        );

        let query = query.as_str();
        stream::iter(2..=total_pages)
            .map(|page| async move {
                self.fetch_page(query, page)
                    .await
                    .map(|listing| (page, listing))
            })
            .buffer_unordered(self.max_parallel_pages)
            .try_fold(records, |mut records, (page, listing)| async move {
                match listing {
                    Some(listing) => records.extend(listing.records),
                    None => warn!(page, "Results page reported Not Found mid-crawl"),
                }
                info!(
                    "Retrieved page {}/{} ({} items)",
                    page,
                    total_pages,
                    records.len()
                );
                Ok(records)
            })
            .await
    }

    async fn fetch_page(&self, query: &str, page: u32) -> Result<Option<ListingPage>, CrawlError> {
        let html = self
            .fetcher
            .fetch(&listing_path(page), &[(SEARCH_PARAM, query)])
            .await
            .map_err(|source| {
                LISTING_PAGES_FETCHED.with_label_values(&["failed"]).inc();
                CrawlError::Fetch { page, source }
            })?;

        let listing = parse_listing_page(&html);
        match &listing {
            Some(listing) => {
                LISTING_PAGES_FETCHED.with_label_values(&["ok"]).inc();
                SUMMARY_RECORDS_EXTRACTED.inc_by(listing.records.len() as u64);
            }
            None => LISTING_PAGES_FETCHED.with_label_values(&["not_found"]).inc(),
        }
        Ok(listing)
    }
}
