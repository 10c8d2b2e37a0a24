// SPDX-License-Identifier: MPL-2.0
//! This module handles the store's configuration, including loading and saving
//! user preferences to a `settings.toml` file and turning them into
//! validated [`StoreSettings`].
//!
//! # Examples
//!
//! ```no_run
//! use notification_store::config::{self, Config, StoreSettings};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.default_duration_ms = Some(8_000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // Clamp into bounds before handing it to a store
//! let settings = StoreSettings::from_config(&config);
//! assert_eq!(settings.default_duration().as_millis(), 8_000);
//! ```

mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::notifications::Kind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "NotificationStore";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    #[serde(default)]
    pub max_visible: Option<usize>,
    #[serde(default)]
    pub diagnostics_buffer_capacity: Option<usize>,
}

/// Validated settings consumed by [`crate::notifications::Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    default_duration: Duration,
    max_visible: usize,
    diagnostics_buffer_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(DEFAULT_DURATION_MS),
            max_visible: DEFAULT_MAX_VISIBLE,
            diagnostics_buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
        }
    }
}

impl StoreSettings {
    /// Builds settings from a loaded config, clamping every value into bounds.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let duration_ms = config
            .default_duration_ms
            .unwrap_or(DEFAULT_DURATION_MS)
            .clamp(MIN_DURATION_MS, MAX_DURATION_MS);
        let max_visible = config
            .max_visible
            .unwrap_or(DEFAULT_MAX_VISIBLE)
            .clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE);
        let diagnostics_buffer_capacity = config
            .diagnostics_buffer_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
            .clamp(
                MIN_DIAGNOSTICS_BUFFER_CAPACITY,
                MAX_DIAGNOSTICS_BUFFER_CAPACITY,
            );

        Self {
            default_duration: Duration::from_millis(duration_ms),
            max_visible,
            diagnostics_buffer_capacity,
        }
    }

    /// Overrides the auto-dismiss delay used for non-loading kinds.
    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(MAX_DURATION_MS);
        self.default_duration = Duration::from_millis(ms.clamp(MIN_DURATION_MS, MAX_DURATION_MS));
        self
    }

    /// Overrides the visible window size.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE);
        self
    }

    #[must_use]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Returns the duration a notification of `kind` gets when none is given.
    ///
    /// Loading notifications stay until updated or removed.
    #[must_use]
    pub fn default_duration_for(&self, kind: Kind) -> Duration {
        if kind.is_loading() {
            Duration::from_millis(LOADING_DURATION_MS)
        } else {
            self.default_duration
        }
    }

    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    #[must_use]
    pub fn diagnostics_buffer_capacity(&self) -> usize {
        self.diagnostics_buffer_capacity
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

/// Reads a config file. Unparseable content yields the default config.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
