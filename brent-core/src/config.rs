//! Dashboard configuration — TOML file with environment overrides.
//!
//! Precedence: command-line flag > `BRENT_API_URL` > config file > defaults.
//! A missing config file is not an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::ChartLayout;

pub const API_URL_ENV: &str = "BRENT_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub api: ApiConfig,
    pub chart: ChartLayout,
}

impl DashConfig {
    /// `<config_dir>/brent-dash/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brent-dash")
            .join("config.toml")
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Apply `BRENT_API_URL` if set and non-empty.
    pub fn with_env(self) -> Self {
        let url = std::env::var(API_URL_ENV).ok();
        self.with_api_url_override(url.as_deref())
    }

    pub fn with_api_url_override(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api.base_url = url.to_string();
        }
        self
    }

    /// Full resolution: file (explicit or default path), env, then flag.
    pub fn resolve(path: Option<&Path>, api_url_flag: Option<&str>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        Ok(Self::from_file(&path)?
            .with_env()
            .with_api_url_override(api_url_flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = DashConfig::default();
        assert_eq!(c.api.base_url, "http://localhost:5000");
        assert_eq!(c.chart, ChartLayout::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = DashConfig::from_toml(
            r#"
            [api]
            base_url = "http://backend:8080"

            [chart]
            height = 30
            "#,
        )
        .unwrap();
        assert_eq!(c.api.base_url, "http://backend:8080");
        assert_eq!(c.api.timeout_secs, 10);
        assert_eq!(c.chart.height, 30);
        assert_eq!(c.chart.breakpoint, 120);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let c = DashConfig::from_file(Path::new("/nonexistent/brent/config.toml")).unwrap();
        assert_eq!(c, DashConfig::default());
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        let err = DashConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn flag_override_wins_and_blank_is_ignored() {
        let c = DashConfig::default().with_api_url_override(Some("http://x:1"));
        assert_eq!(c.api.base_url, "http://x:1");
        let c = c.with_api_url_override(Some("   "));
        assert_eq!(c.api.base_url, "http://x:1");
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let mut api = ApiConfig::default();
        api.timeout_secs = 0;
        assert_eq!(api.timeout(), Duration::from_secs(1));
    }
}
