//! Configuration structures and validation.

use crate::api::BackendConfig;
use crate::error::{Result, SiftError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection settings
    pub backend: BackendSection,
    /// TUI settings
    pub tui: TuiSection,
}

impl AppConfig {
    /// Validate field values; called after file load and CLI merge.
    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(SiftError::config("backend.base_url must not be empty"));
        }
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(SiftError::config(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(SiftError::config("backend.timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// Build the HTTP client configuration from this config.
    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            // Trailing slash would double up in endpoint paths.
            base_url: self.backend.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
        }
    }
}

/// Backend connection section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BackendSection {
    /// Base URL of the analysis backend
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for BackendSection {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// TUI section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiSection {
    /// Theme name: "dark" or "light"
    pub theme: String,
}

impl Default for TuiSection {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

/// User preferences persisted between runs (theme choice).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiPreferences {
    /// Theme name: "dark" or "light"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl TuiPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("siftboard").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = AppConfig {
            backend: BackendSection {
                base_url: "ftp://somewhere".into(),
                timeout_secs: 30,
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = AppConfig {
            backend: BackendSection {
                base_url: "http://localhost:8000".into(),
                timeout_secs: 0,
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backend_config_strips_trailing_slash() {
        let config = AppConfig {
            backend: BackendSection {
                base_url: "http://api.example.com/".into(),
                timeout_secs: 10,
            },
            ..AppConfig::default()
        };
        assert_eq!(config.backend_config().base_url, "http://api.example.com");
    }
}
