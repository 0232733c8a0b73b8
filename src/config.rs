//! Agenda configuration: file names and query windows
//!
//! Loaded from an optional TOML file. Every key has a default, so an empty
//! file (or no file at all) gives the desktop tool's layout:
//!
//! ```toml
//! experts_file = "peritos.json"
//! deadlines_file = "prazos.json"
//! examinations_file = "pericias.json"
//! dashboard_days = 30
//! week_days = 7
//! month_days = 30
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Experts file name, relative to the data directory
    pub experts_file: String,
    pub deadlines_file: String,
    pub examinations_file: String,
    /// Length of the examinations dashboard window, counted from today
    pub dashboard_days: u32,
    pub week_days: u32,
    pub month_days: u32,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            experts_file: "peritos.json".to_string(),
            deadlines_file: "prazos.json".to_string(),
            examinations_file: "pericias.json".to_string(),
            dashboard_days: 30,
            week_days: 7,
            month_days: 30,
        }
    }
}

impl AgendaConfig {
    /// Read a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
