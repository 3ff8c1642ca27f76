//! Activity page configuration.
//!
//! Parsed from TOML. Every field has a default, so a partial or empty
//! config is valid and the sections mirror the TOML schema exactly:
//!
//! ```toml
//! [search]
//! page_size = 20
//!
//! [routes]
//! base_url = "https://margin.example.com"
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Default number of rows per results page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default base URL for redirect targets.
const DEFAULT_BASE_URL: &str = "http://localhost";

/// Configuration for the activity pages.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ActivityConfig {
    /// Search settings section.
    pub search: SearchSettings,
    /// Route settings section.
    pub routes: RouteSettings,
}

/// Search settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// Rows per page when the request carries no usable `page_size`.
    pub page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Route settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RouteSettings {
    /// Absolute base URL that redirect targets are resolved against.
    pub base_url: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML syntax or schema error.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured base URL cannot anchor route building.
    #[error("invalid base_url {url:?}: {message}")]
    BaseUrl {
        /// The rejected URL text.
        url: String,
        /// Why it was rejected.
        message: String,
    },
}

impl ActivityConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config = ActivityConfig::from_toml_str("").unwrap();
        assert_eq!(config.search.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.routes.base_url, "http://localhost");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = ActivityConfig::from_toml_str(
            r#"
            [routes]
            base_url = "http://example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.base_url, "http://example.com");
        assert_eq!(config.search.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn full_config_parses() {
        let config = ActivityConfig::from_toml_str(
            r#"
            [search]
            page_size = 50

            [routes]
            base_url = "https://margin.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.search.page_size, 50);
        assert_eq!(config.routes.base_url, "https://margin.example.com");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ActivityConfig::from_toml_str(
            r#"
            [search]
            page_count = 50
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(ActivityConfig::from_toml_str("[search").is_err());
    }
}
