//! Startup configuration.
//!
//! Read once from `<config_dir>/carlot/config.yaml`; a missing file means
//! defaults. `CARLOT_API_URL` overrides the base URL. Nothing here changes
//! at runtime.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    API_URL_ENV, DEFAULT_API_URL, DEFAULT_BANNER_SECS, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Car Service
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_banner")]
    pub success_banner_secs: u64,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: default_api_url(),
            request_timeout_secs: default_timeout(),
            success_banner_secs: default_banner(),
            log_file: default_log_file(),
        }
    }
}

fn default_api_url() -> String {
    String::from(DEFAULT_API_URL)
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_banner() -> u64 {
    DEFAULT_BANNER_SECS
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn success_banner_ttl(&self) -> Duration {
        Duration::from_secs(self.success_banner_secs)
    }

    /// Base URL without a trailing slash so paths can be appended as-is
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    fn validate(self) -> Result<Self> {
        reqwest::Url::parse(&self.api_url)
            .with_context(|| format!("Invalid Car Service URL: {}", self.api_url))?;
        Ok(self)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("carlot")
        .join("config.yaml")
}

/// Load the config file at the default location and apply env overrides
pub fn load_config() -> Result<AppConfig> {
    let env_url = std::env::var(API_URL_ENV).ok();
    load_config_from(&config_path(), env_url)
}

pub fn load_config_from(path: &Path, env_url: Option<String>) -> Result<AppConfig> {
    let mut config = if path.exists() {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_yaml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
        config.api_url = url.trim().to_string();
    }

    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.yaml"), None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_partial_file_and_env_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_url: http://cars.internal:9000/\nrequest_timeout_secs: 5\n").unwrap();

        let config = load_config_from(&path, None).unwrap();
        assert_eq!(config.base_url(), "http://cars.internal:9000");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.success_banner_secs, 3);

        let config = load_config_from(&path, Some("http://127.0.0.1:8080".into())).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let dir = tempdir().unwrap();
        let result = load_config_from(&dir.path().join("none.yaml"), Some("not a url".into()));
        assert!(result.is_err());
    }
}
