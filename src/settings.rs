//! Persisted timer preferences
//!
//! Preferences live in a small JSON object. Missing keys fall back to the
//! defaults so older or hand-edited files keep working.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DialError;

pub const DEFAULT_TIME_RANGE: (u32, u32) = (1, 999);
pub const SCROLL_STEP_RANGE: (u32, u32) = (1, 60);

/// Timer preferences consumed by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Default countdown in minutes
    pub default_time: u32,
    /// Minutes per scroll step
    pub scroll_min_step: u32,
    /// Seconds per scroll step while fine adjusting
    pub scroll_sec_step: u32,
    pub show_tutorial: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_time: 25,
            scroll_min_step: 5,
            scroll_sec_step: 5,
            show_tutorial: true,
        }
    }
}

impl TimerConfig {
    /// Clamp every field into the range the preferences surface allows
    pub fn normalized(mut self) -> Self {
        self.default_time = self.default_time.clamp(DEFAULT_TIME_RANGE.0, DEFAULT_TIME_RANGE.1);
        self.scroll_min_step = self.scroll_min_step.clamp(SCROLL_STEP_RANGE.0, SCROLL_STEP_RANGE.1);
        self.scroll_sec_step = self.scroll_sec_step.clamp(SCROLL_STEP_RANGE.0, SCROLL_STEP_RANGE.1);
        self
    }

    /// Default time converted to seconds
    pub fn default_seconds(&self) -> i64 {
        self.default_time as i64 * 60
    }

    /// Read preferences from `path`, failing on I/O or parse errors
    pub fn try_load(path: &Path) -> Result<Self, DialError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DialError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;
        let config: TimerConfig =
            serde_json::from_str(&raw).map_err(|source| DialError::ParseSettings {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.normalized())
    }

    /// Read preferences, falling back to defaults when the file is missing or broken
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => {
                info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Failed to load settings: {:#}", anyhow::Error::from(e));
                Self::default()
            }
        }
    }

    /// Write preferences to `path`, creating the parent directory
    pub fn save(&self, path: &Path) -> Result<(), DialError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| DialError::WriteSettings {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let body = serde_json::to_string_pretty(self).map_err(DialError::EncodeSettings)?;
        std::fs::write(path, body).map_err(|source| DialError::WriteSettings {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Default location of the settings file
pub fn default_settings_path() -> Result<PathBuf, DialError> {
    dirs::config_dir()
        .map(|dir| dir.join("dial-timer").join("settings.json"))
        .ok_or(DialError::NoConfigDir)
}
