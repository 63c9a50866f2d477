//! Configuration and settings management for CutKit
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Cut preferences (selection behavior, labels, palette)
//! - View preferences (zoom limits, drag behavior)

use cutkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preferences for the cut engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CutsConfig {
    /// Select a cut as the current one right after it is created
    pub select_new_cut: bool,
    /// Attach a text label to each cut
    pub label_cuts: bool,
    /// Ordered palette of color names cycled across cuts
    pub colors: Vec<String>,
}

impl Default for CutsConfig {
    fn default() -> Self {
        Self {
            select_new_cut: true,
            label_cuts: true,
            colors: cutkit_core::DEFAULT_CUT_COLORS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Preferences for the image view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Replot cuts continuously while a cut is dragged
    pub drag_update: bool,
    /// Initial zoom factor
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            drag_update: false,
            zoom: 1.0,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cuts: CutsConfig,
    pub view: ViewConfig,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.cuts.colors.is_empty() {
            return Err(Error::other("Cut color palette must not be empty".to_string()));
        }

        if self.view.zoom <= 0.0 {
            return Err(Error::other("Zoom must be > 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert!(config.cuts.select_new_cut);
        assert!(config.cuts.label_cuts);
        assert_eq!(config.cuts.colors.len(), 10);
        assert_eq!(config.cuts.colors[0], "green");
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let mut config = Config::new();
        config.cuts.colors.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trip_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::new();
        config.cuts.select_new_cut = false;
        config.cuts.colors = vec!["red".to_string(), "blue".to_string()];
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(!loaded.cuts.select_new_cut);
        assert_eq!(loaded.cuts.colors, vec!["red", "blue"]);
        // untouched sections keep their defaults
        assert!(loaded.cuts.label_cuts);
    }

    #[test]
    fn test_round_trip_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::new();
        config.view.zoom = 2.0;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.view.zoom, 2.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cuts]\nlabel_cuts = false\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(!loaded.cuts.label_cuts);
        assert_eq!(loaded.cuts.colors.len(), 10);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "cuts: {}").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }
}
