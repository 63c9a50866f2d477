//! CutKit Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{Config, CutsConfig, ViewConfig};
pub use error::{SettingsError, SettingsResult};
pub use manager::SettingsManager;
