// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, loading and saving
//! localization preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use lens_i18n::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.language, Some("fr".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::component::RenderMode;
use crate::domain::diagnostics::TimelineCapacity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LensI18n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub fallback_language: Option<String>,
    /// Keeps the devtools bridge active in release builds.
    #[serde(default)]
    pub production_devtools: Option<bool>,
    #[serde(default)]
    pub server_side: Option<bool>,
    #[serde(default)]
    pub timeline_capacity: Option<usize>,
    #[serde(default)]
    pub fallback_root: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            fallback_language: Some(DEFAULT_FALLBACK_LOCALE.to_string()),
            production_devtools: Some(false),
            server_side: Some(false),
            timeline_capacity: Some(DEFAULT_TIMELINE_CAPACITY),
            fallback_root: Some(DEFAULT_FALLBACK_ROOT),
        }
    }
}

impl Config {
    #[must_use]
    pub fn render_mode(&self) -> RenderMode {
        RenderMode::from_server_flag(self.server_side.unwrap_or(false))
    }

    #[must_use]
    pub fn timeline_capacity(&self) -> TimelineCapacity {
        self.timeline_capacity
            .map(TimelineCapacity::new)
            .unwrap_or_default()
    }

    /// Whether the diagnostics bridge is active for this build and configuration.
    #[must_use]
    pub fn devtools_enabled(&self) -> bool {
        cfg!(feature = "devtools")
            && (cfg!(debug_assertions) || self.production_devtools.unwrap_or(false))
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), "invalid settings file, using defaults: {err}");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_language() {
        let config = Config {
            language: Some("fr".to_string()),
            fallback_language: Some("en-US".to_string()),
            server_side: Some(true),
            timeline_capacity: Some(250),
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let loaded: Config = toml::from_str("language = \"de\"").expect("valid toml");
        assert_eq!(loaded.language.as_deref(), Some("de"));
        assert!(loaded.fallback_language.is_none());
        assert_eq!(loaded.render_mode(), RenderMode::Interactive);
        assert_eq!(loaded.timeline_capacity(), TimelineCapacity::default());
    }

    #[test]
    fn server_side_flag_selects_server_render_mode() {
        let config = Config {
            server_side: Some(true),
            ..Config::default()
        };
        assert_eq!(config.render_mode(), RenderMode::Server);
    }

    #[test]
    fn timeline_capacity_is_clamped() {
        let config = Config {
            timeline_capacity: Some(1),
            ..Config::default()
        };
        assert_eq!(config.timeline_capacity().value(), MIN_TIMELINE_CAPACITY);
    }

    #[test]
    fn devtools_follow_build_profile_in_debug() {
        let config = Config::default();
        if cfg!(all(feature = "devtools", debug_assertions)) {
            assert!(config.devtools_enabled());
        }
    }
}
