//! Application configuration management.
//!
//! Holds the API base URL, the acting school and an optional bearer token.
//! Configuration is stored at `~/.config/teamdesk/config.json`; the
//! `TEAMDESK_API_URL`, `TEAMDESK_SCHOOL_ID` and `TEAMDESK_TOKEN` environment
//! variables override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Application name used for config directory paths
const APP_NAME: &str = "teamdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const ENV_API_URL: &str = "TEAMDESK_API_URL";
pub const ENV_SCHOOL_ID: &str = "TEAMDESK_SCHOOL_ID";
pub const ENV_TOKEN: &str = "TEAMDESK_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub school_id: Option<i64>,
    pub api_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
        if let Some(raw) = lookup(ENV_SCHOOL_ID) {
            match raw.trim().parse::<i64>() {
                Ok(id) => self.school_id = Some(id),
                Err(_) => warn!(value = %raw, "Ignoring non-numeric {}", ENV_SCHOOL_ID),
            }
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|t| !t.trim().is_empty()) {
            self.api_token = Some(token);
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// The acting school. Every roster query takes it explicitly.
    pub fn school_id(&self) -> Result<i64> {
        self.school_id.ok_or_else(|| {
            anyhow::anyhow!(
                "No school configured. Set school_id in {} or {}",
                CONFIG_FILE,
                ENV_SCHOOL_ID
            )
        })
    }
}
