//! List configuration.
//!
//! Settings are stored as JSON. A missing file is created with defaults; a
//! file that exists but does not parse is reported as an error.

use crate::text_source::DEFAULT_PASSWORD_CHAR;
use crate::theme::DEFAULT_THEME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "rvlist";
const CONFIG_FILE: &str = "config.json";

/// User-facing list settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Name of the theme to start with
    pub theme: String,
    /// Draw dividers between rows
    pub separators: bool,
    /// Render rows as password characters
    pub concealed: bool,
    pub password_char: char,
    /// Number of generated rows when no text file is given
    pub rows: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            separators: true,
            concealed: false,
            password_char: DEFAULT_PASSWORD_CHAR,
            rows: 1000,
        }
    }
}

impl ListConfig {
    /// Returns the default config location (`<config dir>/rvlist/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse list configuration")
    }

    /// Loads the config at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        let config = Self::default();
        config.save(path)?;
        log::info!("wrote default config to {}", path.display());
        Ok(config)
    }

    /// Writes the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
