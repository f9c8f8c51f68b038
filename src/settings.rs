//! Persistent defaults for the CLI.
//! Stored in the platform-specific config directory via `directories::ProjectDirs`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::transform::{DEFAULT_FILTER, DEFAULT_MAGICK_PATH, DEFAULT_OUTPUT_PREFIX};

/// Default capture window width.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;

/// Default capture window height.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1024;

/// Settings that can be saved and loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Prefix prepended to output file names
    pub output_prefix: String,
    /// ImageMagick binary ("convert" or "magick")
    pub magick_path: String,
    /// Resampling filter for the distort
    pub filter: String,
    /// Capture window width
    pub window_width: u32,
    /// Capture window height
    pub window_height: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            magick_path: DEFAULT_MAGICK_PATH.to_string(),
            filter: DEFAULT_FILTER.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl AppSettings {
    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "moderras", "donut-depolar")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path.
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load settings from the config file, falling back to defaults.
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .map(|content| Self::from_json(&content))
            .unwrap_or_default()
    }

    /// Parse settings JSON; malformed content yields defaults.
    pub fn from_json(content: &str) -> Self {
        let mut loaded: Self = match serde_json::from_str(content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring malformed settings file: {}", e);
                return Self::default();
            }
        };

        // An empty prefix would overwrite the inputs
        let defaults = Self::default();
        if loaded.output_prefix.is_empty() {
            loaded.output_prefix = defaults.output_prefix;
        }
        if loaded.magick_path.is_empty() {
            loaded.magick_path = defaults.magick_path;
        }
        if loaded.filter.is_empty() {
            loaded.filter = defaults.filter;
        }
        if loaded.window_width == 0 {
            loaded.window_width = defaults.window_width;
        }
        if loaded.window_height == 0 {
            loaded.window_height = defaults.window_height;
        }

        loaded
    }

    /// Save settings to the config file.
    pub fn save(&self) -> Result<(), String> {
        let dir = Self::config_dir().ok_or("Cannot determine config directory")?;

        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;

        let path = dir.join("settings.json");
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.output_prefix, "out_");
        assert_eq!(settings.magick_path, "convert");
        assert_eq!(settings.filter, "Cubic");
        assert_eq!((settings.window_width, settings.window_height), (1280, 1024));
    }

    #[test]
    fn test_from_json_partial_file() {
        let settings = AppSettings::from_json(r#"{"magick_path": "magick", "window_width": 0}"#);
        assert_eq!(settings.magick_path, "magick");
        assert_eq!(settings.window_width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(settings.output_prefix, "out_");
    }

    #[test]
    fn test_from_json_malformed() {
        assert_eq!(AppSettings::from_json("not json"), AppSettings::default());
    }
}
