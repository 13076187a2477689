//! Application configuration loaded from `config.toml`.
//!
//! Every section and field has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::orchestrator::{Endpoint, NormalizationPolicy, ResultLayout};
use crate::tui::Theme;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend location and request shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub process_path: String,
    pub health_path: String,
    /// JSON body field carrying the query (`text` for `/api/process`, `query` for `/api/search`)
    pub query_field: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let endpoint = Endpoint::default();
        Self {
            base_url: endpoint.base_url,
            process_path: endpoint.process_path,
            health_path: endpoint.health_path,
            query_field: endpoint.query_field,
            timeout_secs: endpoint.timeout.as_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub max_results: usize,
    pub layout: ResultLayout,
    pub theme: Theme,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let policy = NormalizationPolicy::default();
        Self { max_results: policy.max_results, layout: policy.layout, theme: Theme::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the platform data directory location
    pub history_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `PROF_FINDER_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl AppConfig {
    /// Parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load `path` if it exists, `None` when it does not
    pub fn load_if_present(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint {
            base_url: self.api.base_url.clone(),
            process_path: self.api.process_path.clone(),
            health_path: self.api.health_path.clone(),
            query_field: self.api.query_field.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs.max(1)),
        }
    }

    pub fn policy(&self) -> NormalizationPolicy {
        NormalizationPolicy { max_results: self.display.max_results, layout: self.display.layout }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint(), Endpoint::default());
        assert_eq!(config.policy(), NormalizationPolicy::default());
        assert_eq!(config.display.theme, Theme::Dark);
        assert_eq!(config.logging.level, "info");
        assert!(config.storage.history_file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://prof.example:8080"

            [display]
            layout = "block"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://prof.example:8080");
        assert_eq!(config.api.process_path, "/api/process");
        assert_eq!(config.display.layout, ResultLayout::Block);
        assert_eq!(config.display.max_results, 5);
    }

    #[test]
    fn test_load_if_present_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load_if_present(&dir.path().join("config.toml")).unwrap().is_none());
    }

    #[test]
    fn test_load_if_present_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[display\nmax_results = ").unwrap();

        let err = AppConfig::load_if_present(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.display.theme = Theme::Light;
        config.api.timeout_secs = 5;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert_eq!(config.endpoint().timeout, Duration::from_secs(1));
    }
}
