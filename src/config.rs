//! Persisted UI settings stored as `config.toml` in the app directory.
//!
//! Only window/startup preferences live here. Training records are never
//! written to disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Preload the three demonstration days.
    #[serde(default = "default_true")]
    pub seed_demo_entries: bool,
    #[serde(default)]
    pub start_maximized: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seed_demo_entries: true,
            start_maximized: false,
        }
    }
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from the app directory, writing defaults if missing.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    load_or_default_from(&path)
}

/// Load configuration from `path`, writing defaults there if it does not exist.
pub fn load_or_default_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if path.exists() {
        return load_from(path);
    }
    let settings = AppSettings::default();
    save_to_path(&settings, path)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(settings)
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn default_true() -> bool {
    true
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults_and_writes_them() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let settings = load_or_default_from(&path).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(path.is_file());
        assert_eq!(load_or_default_from(&path).unwrap(), settings);
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let settings = AppSettings {
            seed_demo_entries: false,
            start_maximized: true,
        };
        save_to_path(&settings, &path).unwrap();
        assert_eq!(load_or_default_from(&path).unwrap(), settings);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "start_maximized = true\n").unwrap();

        let settings = load_or_default_from(&path).unwrap();
        assert!(settings.seed_demo_entries);
        assert!(settings.start_maximized);
    }

    #[test]
    fn malformed_toml_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "seed_demo_entries = \"sometimes\"\n").unwrap();

        let err = load_or_default_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { ref path, .. } if path.ends_with(CONFIG_FILE_NAME)));
    }
}
