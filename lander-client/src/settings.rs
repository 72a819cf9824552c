//! Window and logging settings.
//!
//! Read once at startup from `settings.json` in the user's config directory.
//! The level itself is not configurable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Directory the sprite images are read from.
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fullscreen: false,
            vsync: true,
            log_level: "info".to_string(),
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl Settings {
    /// `<config dir>/rocket-lander/settings.json`, if the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rocket-lander").join("settings.json"))
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Loads the settings at `path`. A missing file gives the defaults; an
    /// unreadable or malformed one is reported and also gives the defaults.
    ///
    /// Nothing is logged here since the logger is configured from the result.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<String>) {
        let Some(path) = path else {
            return (Self::default(), None);
        };
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(settings) => (settings, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("Ignoring malformed {}: {}", path.display(), e)),
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Self::default(), None),
            Err(e) => (
                Self::default(),
                Some(format!("Could not read {}: {}", path.display(), e)),
            ),
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
