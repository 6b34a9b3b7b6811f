// SPDX-License-Identifier: MPL-2.0
//! This module handles the browsing configuration: default and maximum
//! item counts plus the set of named layout presets, loaded from a
//! `settings.toml` file.
//!
//! Configuration is read once per session and treated as read-only; a
//! recycle action re-reads it wholesale.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MediaLens";

/// Default number of items shown per page.
pub const DEFAULT_MAX_ITEMS: usize = 300;

/// Ceiling for the user-adjustable item count.
pub const DEFAULT_MAX_ITEMS_LIMIT: usize = 3000;

/// A named grid layout: column count paired with an image width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub columns: usize,
    pub image_width: u32,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} columns, {} px", self.columns, self.image_width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_items")]
    pub default_max_items: usize,
    #[serde(default = "default_max_items_limit")]
    pub max_items_limit: usize,
    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
    #[serde(default)]
    pub default_preset: usize,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_max_items_limit() -> usize {
    DEFAULT_MAX_ITEMS_LIMIT
}

fn default_presets() -> Vec<Preset> {
    vec![
        Preset {
            columns: 2,
            image_width: 1024,
        },
        Preset {
            columns: 3,
            image_width: 768,
        },
        Preset {
            columns: 5,
            image_width: 512,
        },
        Preset {
            columns: 8,
            image_width: 256,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_max_items: default_max_items(),
            max_items_limit: default_max_items_limit(),
            presets: default_presets(),
            // 5 columns at 512 px
            default_preset: 2,
        }
    }
}

impl Config {
    /// Returns the preset at `index`, clamped to a valid entry.
    ///
    /// Falls back to the first built-in preset if the configured list is
    /// somehow empty.
    #[must_use]
    pub fn preset(&self, index: usize) -> Preset {
        if self.presets.is_empty() {
            return default_presets()[0];
        }
        let index = index.min(self.presets.len() - 1);
        self.presets[index]
    }

    /// Returns the default preset for this configuration.
    #[must_use]
    pub fn default_preset(&self) -> Preset {
        self.preset(self.default_preset)
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
