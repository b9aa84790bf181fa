//! Configuration module for siftboard.
//!
//! Type-safe configuration with YAML file loading, discovery, and CLI
//! merging. Place a `.siftboard.yaml` in the working directory or
//! `~/.config/siftboard/config.yaml`:
//!
//! ```yaml
//! backend:
//!   base_url: http://localhost:8000
//!   timeout_secs: 30
//! tui:
//!   theme: dark
//! ```

mod types;

pub use types::{AppConfig, BackendSection, TuiPreferences, TuiSection};

use crate::error::{Result, SiftError};
use std::path::{Path, PathBuf};

/// File name searched for in the working directory.
const LOCAL_CONFIG_NAME: &str = ".siftboard.yaml";

/// Locate a config file: explicit path, working directory, then the user
/// config directory.
#[must_use]
pub fn discover_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|p| p.join("siftboard").join("config.yaml"))
        .filter(|p| p.is_file())
}

/// Load a config file, failing on unreadable or invalid YAML.
pub fn load_config_file(path: &Path) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| SiftError::io(path, e))?;
    let config: AppConfig = serde_yaml::from_str(&raw)
        .map_err(|e| SiftError::config(format!("{}: {e}", path.display())))?;
    Ok(config)
}

/// Load the discovered config or fall back to defaults. Returns the path
/// actually loaded, if any, for the startup log line.
pub fn load_or_default(explicit: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    match discover_config_file(explicit) {
        Some(path) => {
            let config = load_config_file(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

/// Generate a JSON Schema for the configuration format, for editor
/// validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "backend:\n  base_url: http://10.0.0.5:8000\n  timeout_secs: 5\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.backend.timeout_secs, 5);
        // Unspecified sections fall back to defaults
        assert_eq!(config.tui.theme, "dark");
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "backend: [not a map").unwrap();
        assert!(load_config_file(&path).is_err());
    }

    #[test]
    fn test_schema_generation() {
        let schema = generate_json_schema();
        assert!(schema.contains("base_url"));
    }
}
