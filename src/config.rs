//! User configuration, read from `<config dir>/logix/config.toml`.
//!
//! ```toml
//! [history]
//! limit = 5        # 0 keeps every entry
//!
//! [graph]
//! x_min = -10.0
//! x_max = 10.0
//! step = 0.05
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{GraphSettings, SettingsPatch};
use crate::history::DEFAULT_LIMIT;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    /// Overrides applied on top of the default graph settings.
    pub graph: SettingsPatch,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Entries kept; `0` means unbounded.
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl HistoryConfig {
    pub fn limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit)
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("logix").join("config.toml"))
    }

    /// Load from the default location. A missing file gives the defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Graph settings with the configured overrides applied.
    pub fn graph_settings(&self) -> Result<GraphSettings> {
        GraphSettings::default()
            .merged(&self.graph)
            .context("Invalid [graph] settings")
    }
}
