use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Site base URL is an http(s) URL
/// - Request timeout is not 0
/// - Page-fetch concurrency is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.site.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "site.base_url must be an http(s) URL, got {:?}",
            config.site.base_url
        )));
    }

    if config.site.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "site.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.crawler.max_parallel_pages == 0 {
        return Err(ConfigError::ValidationError(
            "crawler.max_parallel_pages cannot be 0".to_string(),
        ));
    }

    if let Some(command) = &config.launcher.command {
        if command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "launcher.command cannot be blank".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_parallel_pages_fails() {
        let mut config = Config::default();
        config.crawler.max_parallel_pages = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_non_http_base_url_fails() {
        let mut config = Config::default();
        config.site.base_url = "audiobookbay.fi".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = Config::default();
        config.site.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_blank_launcher_fails() {
        let mut config = Config::default();
        config.launcher.command = Some("  ".to_string());
        assert!(validate_config(&config).is_err());
    }
}
