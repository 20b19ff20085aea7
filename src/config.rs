//! Configuration for the client and the pipeline.
//!
//! Everything has a default; an optional TOML file overrides it:
//!
//! ```toml
//! [api]
//! base_url = "https://api.anixart.tv"
//! timeout_secs = 30
//!
//! [wrapped]
//! top_rated_limit = 10
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;

/// Base URL for the Anixart API.
pub const DEFAULT_BASE_URL: &str = "https://api.anixart.tv";

/// User agent the mobile app sends; the API rejects unknown clients.
pub const DEFAULT_USER_AGENT: &str =
    "AnixartApp/8.2.1-23121216 (Android 9; SDK 28; arm64-v8a; samsung SM-N975F; en)";

/// Directory name under the platform config dir.
const APP_DIR: &str = "anixart-wrapped";

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,

    /// User-Agent header.
    pub user_agent: String,

    /// Per-request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,

    /// Entries per page the API returns for listings.
    pub page_size: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            page_size: 25,
        }
    }
}

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrappedConfig {
    /// How many five-star votes to show.
    pub top_rated_limit: usize,

    /// Upper bound on pages walked per listing.
    pub max_pages: u64,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        Self {
            top_rated_limit: 10,
            max_pages: 200,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ClientConfig,
    pub wrapped: WrappedConfig,
}

impl Config {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load the config file if it exists, defaults otherwise.
    ///
    /// An explicitly given path must exist; the default path may not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) => match Self::load(&path) {
                Ok(config) => Ok(config),
                Err(crate::WrappedError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                    debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
                Err(e) => Err(e),
            },
            None => Ok(Self::default()),
        }
    }
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default session file location.
pub fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.anixart.tv");
        assert_eq!(config.api.page_size, 25);
        assert_eq!(config.wrapped.top_rated_limit, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            base_url = "http://localhost:8080"

            [wrapped]
            top_rated_limit = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.wrapped.top_rated_limit, 5);
        assert_eq!(config.wrapped.max_pages, 200);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[api]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, crate::WrappedError::ConfigError(_)));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let path = std::env::temp_dir().join("anixart-wrapped-no-such-config.toml");
        assert!(Config::load_or_default(Some(&path)).is_err());
    }
}
