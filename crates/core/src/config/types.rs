use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub launcher: LauncherConfig,
}

/// Source site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Page target to pull information from
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// User-Agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://audiobookbay.fi".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("abb-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Pagination crawler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlerConfig {
    /// How many result pages to pull simultaneously. Be nice to their database.
    #[serde(default = "default_max_parallel_pages")]
    pub max_parallel_pages: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_parallel_pages: default_max_parallel_pages(),
        }
    }
}

fn default_max_parallel_pages() -> usize {
    5
}

/// Extraction cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_path")]
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("abb-cache.db")
}

/// Session presentation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// How many recent searches to show
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_recent_limit() -> usize {
    50
}

/// External program that accepts magnet links (e.g. transmission-remote-gtk)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LauncherConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}
