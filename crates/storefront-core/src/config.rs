//! Application configuration management.
//!
//! This module handles loading the client configuration: the
//! backend base address and the fixed request timeout.
//!
//! Configuration is stored at `~/.config/storefront/config.json`. The
//! `STOREFRONT_API_URL` and `STOREFRONT_TIMEOUT_SECS` environment variables
//! override the file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "storefront";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend address as seen from the Android emulator
const DEFAULT_API_BASE_URL: &str = "http://10.0.2.2:3000/";

/// HTTP request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "STOREFRONT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from the config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from any key lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_TIMEOUT_SECS, secs))?;
            self.validate()
                .with_context(|| format!("Invalid {}: {}", ENV_TIMEOUT_SECS, secs))?;
        }
        Ok(())
    }

    /// A zero timeout would fail every request immediately
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS {
            anyhow::bail!(
                "request_timeout_secs must be at least {}, got {}",
                MIN_REQUEST_TIMEOUT_SECS,
                self.request_timeout_secs
            );
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
