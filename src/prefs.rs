//! Persisted viewer preferences (`preferences.json`)
//!
//! The only state the viewer writes. Missing or unreadable files fall back to
//! defaults; unknown values inside a readable file do too.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::get_config_dir;

pub const PREFERENCES_FILENAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        match value.as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_str().to_string()
    }
}

fn default_autoscroll() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    /// Open pages scrolled to their newest message
    #[serde(default = "default_autoscroll")]
    pub autoscroll: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { theme: Theme::default(), autoscroll: true }
    }
}

impl Preferences {
    pub fn path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join(PREFERENCES_FILENAME))
    }

    /// Load from the config directory, falling back to defaults
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!(error = %e, "no config directory, using default preferences");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "preferences not read");
                return Self::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "malformed preferences, using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write preferences: {}", path.display()))?;
        Ok(())
    }
}
