pub mod cache;
pub mod catalog;
pub mod config;
pub mod crawler;
pub mod detail;
pub mod fetcher;
pub mod html;
pub mod item_id;
pub mod listing;
pub mod magnet;
pub mod metrics;
pub mod testing;

pub use cache::{
    CacheError, CacheStore, ExtractionCache, MemoryCacheStore, RecentSearches, SqliteCacheStore,
};
pub use catalog::{CatalogError, CatalogService};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use crawler::{CrawlError, PaginationCrawler};
pub use detail::{parse_detail_page, DetailRecord};
pub use fetcher::{FetchError, HttpPageFetcher, PageFetcher};
pub use listing::{parse_listing_page, ListingPage, PaginationInfo, SummaryRecord};
pub use magnet::{magnet_uri, LaunchError, MagnetLauncher};
