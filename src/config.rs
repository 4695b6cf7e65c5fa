// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! User settings.
//!
//! Settings are stored as JSON in the platform config directory
//! (`~/.config/drawing-editor/settings.json` on Linux). Every field has a
//! default, so partial or missing files are fine; a file that cannot be
//! parsed is reported and replaced by the defaults.

use crate::editor::history::DEFAULT_HISTORY_DEPTH;
use crate::models::document::DEFAULT_CANVAS_SIZE;
use crate::models::Rgba;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "drawing-editor";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Persisted editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial width offered by the New document prompt
    pub canvas_width: u32,
    /// Initial height offered by the New document prompt
    pub canvas_height: u32,
    /// Bounding box side of newly inserted shapes
    pub shape_size: u32,
    /// Diagonal offset applied on every paste
    pub paste_offset: i32,
    /// Capacity of the undo and redo stacks
    pub history_depth: usize,
    /// Initial fill colour for inserted shapes
    pub fill_color: Rgba,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_SIZE.0,
            canvas_height: DEFAULT_CANVAS_SIZE.1,
            shape_size: 50,
            paste_offset: 5,
            history_depth: DEFAULT_HISTORY_DEPTH,
            fill_color: Rgba::BLUE,
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings)
    }

    /// Load settings from the default location, falling back to defaults.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_or_default(&path),
            None => {
                log::warn!("No config directory available, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`; a missing file silently yields defaults.
    pub fn load_from_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{:#}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!((settings.canvas_width, settings.canvas_height), (200, 200));
        assert_eq!(settings.shape_size, 50);
        assert_eq!(settings.paste_offset, 5);
        assert_eq!(settings.history_depth, 10);
        assert_eq!(settings.fill_color, Rgba::opaque(0, 0, 255));
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "shape_size": 30 }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.shape_size, 30);
        assert_eq!(settings.paste_offset, 5);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from_or_default(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            history_depth: 3,
            fill_color: Rgba::opaque(10, 20, 30),
            ..Settings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }
}
