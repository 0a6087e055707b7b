//! User configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::storage::get_app_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_profile")]
    pub default_profile: String,

    #[serde(default)]
    pub board: BoardConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: default_profile(),
            board: BoardConfig::default(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Show completed tasks on the board (dimmed) instead of hiding them
    #[serde(default = "default_true")]
    pub show_completed: bool,

    /// strftime format for due dates in the board and list output
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            show_completed: true,
            date_format: default_date_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}
