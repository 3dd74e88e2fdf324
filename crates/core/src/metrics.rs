//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Listing page fetches during pagination crawls
//! - Records extracted from listing pages
//! - Extraction cache lookups and evictions

use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts};

/// Listing pages fetched, by result.
pub static LISTING_PAGES_FETCHED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("abb_listing_pages_fetched_total", "Listing pages fetched"),
        &["result"], // "ok", "not_found", "failed"
    )
    .unwrap()
});

/// Summary records extracted from listing pages.
pub static SUMMARY_RECORDS_EXTRACTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "abb_summary_records_extracted_total",
        "Summary records extracted from listing pages",
    )
    .unwrap()
});

/// Cache lookups by namespace and result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("abb_cache_lookups_total", "Extraction cache lookups"),
        &["namespace", "result"], // namespace: "search", "book"; result: "hit", "miss"
    )
    .unwrap()
});

/// Cache keys deleted by bulk clears.
pub static CACHE_KEYS_EVICTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "abb_cache_keys_evicted_total",
        "Cache keys deleted by cache clears",
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(LISTING_PAGES_FETCHED.clone()),
        Box::new(SUMMARY_RECORDS_EXTRACTED.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(CACHE_KEYS_EVICTED.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::Registry;

    #[test]
    fn test_all_metrics_register() {
        let registry = Registry::new();
        for metric in all_metrics() {
            registry.register(metric).unwrap();
        }
        LISTING_PAGES_FETCHED.with_label_values(&["ok"]).inc();
        assert!(!registry.gather().is_empty());
    }
}
