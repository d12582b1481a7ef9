//! Optional configuration file.
//!
//! Settings are read from `config.toml` in the platform config directory
//! (`~/.config/wallfetch/config.toml` on Linux). Every key is optional and
//! command-line flags take precedence.
//!
//! ```toml
//! manifest_url = "https://example.com/manifest.json"
//! output_dir = "/home/user/Pictures/walls"
//! concurrency = 8
//! timeout_secs = 60
//! ```
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub manifest_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Settings {
    /// Loads settings from the default location, or defaults if there is no
    /// config file.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads settings from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Like [`Settings::load`], but a missing, unreadable or malformed
    /// config file only logs a warning and yields defaults.
    pub fn load_or_default() -> Self {
        Self::or_default(Self::load())
    }

    /// Like [`Settings::load_from`], but errors are logged and replaced by
    /// defaults.
    pub fn load_from_or_default(path: &Path) -> Self {
        Self::or_default(Self::load_from(path))
    }

    fn or_default(loaded: Result<Self>) -> Self {
        loaded.unwrap_or_else(|e| {
            warn!("Ignoring config file, using defaults: {e:#}");
            Self::default()
        })
    }
}

/// Path of the config file for the current user.
pub fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "wallfetch")
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(dirs.config_dir().join("config.toml"))
}
