//! reqwest-backed page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::SiteConfig;

use super::{FetchError, PageFetcher};

/// Fetches pages from the configured site.
pub struct HttpPageFetcher {
    client: Client,
    base_url: Url,
}

impl HttpPageFetcher {
    /// Create a fetcher for the given site configuration.
    pub fn new(config: &SiteConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self { client, base_url })
    }

    /// Absolute URL of a site path; unsafe characters are percent-encoded.
    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, path: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = self.url_for(path)?;
        debug!(url = %url, ?query, "Fetching page");

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else if e.is_connect() {
                    FetchError::Connection(e.to_string())
                } else {
                    FetchError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Http {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Request(e.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base: &str) -> HttpPageFetcher {
        HttpPageFetcher::new(&SiteConfig {
            base_url: base.to_string(),
            ..SiteConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_joins_site_root() {
        let url = fetcher("http://audiobookbay.fi").url_for("/page/2/").unwrap();
        assert_eq!(url.as_str(), "http://audiobookbay.fi/page/2/");
    }

    #[test]
    fn test_url_for_encodes_item_path() {
        let url = fetcher("http://audiobookbay.fi/")
            .url_for("/audio-books/dune frank herbert/")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://audiobookbay.fi/audio-books/dune%20frank%20herbert/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpPageFetcher::new(&SiteConfig {
            base_url: "not a url".to_string(),
            ..SiteConfig::default()
        });
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}
