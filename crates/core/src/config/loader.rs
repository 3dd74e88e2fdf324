use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration: defaults, then the TOML file (if given), then `ABB_` environment overrides.
///
/// Nested keys use a double underscore, e.g. `ABB_CRAWLER__MAX_PARALLEL_PAGES=2`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment
        .merge(Env::prefixed("ABB_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[crawler]
max_parallel_pages = 3
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.crawler.max_parallel_pages, 3);
        assert_eq!(config.site.base_url, "http://audiobookbay.fi");
    }

    #[test]
    fn test_load_config_from_str_wrong_type() {
        let toml = r#"
[crawler]
max_parallel_pages = "many"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/abb.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_without_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.site.base_url.starts_with("http"));
        assert!(config.crawler.max_parallel_pages > 0);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[site]
base_url = "http://localhost:8089"

[session]
recent_limit = 7
"#
        )
        .unwrap();

        let config = load_config(Some(temp_file.path())).unwrap();
        assert_eq!(config.site.base_url, "http://localhost:8089");
        assert_eq!(config.session.recent_limit, 7);
        assert_eq!(config.crawler.max_parallel_pages, 5);
    }
}
