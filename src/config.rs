//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Query parameter name carrying the scan status on the report endpoint.
    /// The existing backend reads it as `employeeId`.
    #[serde(default = "default_status_param")]
    pub status_param: String,
    /// Path prefix of the per-employee detail report page.
    #[serde(default = "default_detail_path")]
    pub detail_path: String,
    /// Request timeout in seconds; unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_status_param() -> String {
    "employeeId".to_string()
}

fn default_detail_path() -> String {
    "/report".to_string()
}

/// Department chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Chart data endpoint, absolute or relative to `api.base_url`.
    pub endpoint: String,
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub file_name: String,
}

impl AppConfig {
    /// Get config file path (platform config dir, else next to the executable).
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("", "", "attendance-dashboard") {
            return dirs.config_dir().join("config.toml");
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
        }
        if !base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.status_param.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Status parameter name cannot be empty".to_string(),
            ));
        }
        if self.api.request_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.chart.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation("Chart endpoint cannot be empty".to_string()));
        }
        if !self.export.file_name.ends_with(".csv") {
            return Err(ConfigError::Validation(
                "Export file name must end with .csv".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            status_param: default_status_param(),
            detail_path: default_detail_path(),
            request_timeout_secs: None,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/attendance/chart".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: crate::export::DEFAULT_FILE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_status_param_is_backend_alias() {
        let config = AppConfig::default();
        assert_eq!(config.api.status_param, "employeeId");
        assert_eq!(config.export.file_name, "attendance_report.csv");
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_status_param() {
        let mut config = AppConfig::default();
        config.api.status_param = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.api.request_timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.api.request_timeout_secs = Some(30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let content = r#"
            [api]
            base_url = "https://hr.example.com"
        "#;
        let config: AppConfig = toml::from_str(content).unwrap();

        assert_eq!(config.api.base_url, "https://hr.example.com");
        assert_eq!(config.api.status_param, "employeeId");
        assert_eq!(config.api.detail_path, "/report");
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.chart.endpoint, "/api/attendance/chart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_try_load_missing() {
        let path = std::env::temp_dir().join("attendance-dashboard-missing-config.toml");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join("attendance-dashboard-config-test")
            .join("config.toml");
        let mut config = AppConfig::default();
        config.api.base_url = "http://10.0.0.5:8080".to_string();
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.api.base_url, "http://10.0.0.5:8080"),
            other => panic!("unexpected load result: {other:?}"),
        }

        let _ = std::fs::remove_file(&path);
    }
}
