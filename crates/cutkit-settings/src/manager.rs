//! Locates, loads, and saves the application configuration file.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};

const APP_DIR: &str = "cutkit";
const CONFIG_FILE: &str = "config.toml";

/// Manages the on-disk configuration under the platform config directory.
pub struct SettingsManager;

impl SettingsManager {
    /// Platform configuration directory for the application.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Creates the configuration directory if it does not exist.
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Full path of the configuration file.
    pub fn config_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist or cannot be parsed.
    pub fn load() -> Config {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("{}, using default settings", e);
                return Config::default();
            }
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Config::default();
        }
        match Config::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration, creating the directory as needed.
    pub fn save(config: &Config) -> SettingsResult<()> {
        Self::ensure_config_dir()?;
        let path = Self::config_path()?;
        config
            .save_to_file(&path)
            .map_err(|e| SettingsError::SaveError(e.to_string()))?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}
