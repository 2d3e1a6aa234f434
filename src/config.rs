//! Application configuration management.
//!
//! The config holds the base URL the static recipe document and the rest of
//! the app shell are fetched from. It is stored at
//! `~/.config/barback/config.json`; the `BARBACK_BASE_URL` environment
//! variable overrides the stored value.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache/data directory paths
const APP_NAME: &str = "barback";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Origin the recipe document is served from when nothing overrides it.
pub const DEFAULT_BASE_URL: &str = "https://recipes.barback.dev/";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub base_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Effective base URL: env override, then config, then the default.
    pub fn base_url(&self) -> String {
        std::env::var("BARBACK_BASE_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Where the asset cache lives. Evictable.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Where persisted user state (favorites, my bar) lives.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}
