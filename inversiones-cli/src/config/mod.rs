//! Configuration for the pipeline
//!
//! Loaded from a TOML file (explicit `--config` path, or
//! `<config dir>/inversiones-cli/config.toml` when present), then overridden
//! by environment variables. A `.env` file is read before this runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::constants::MEF_REPORT_ENDPOINT;

pub const APP_DIR_NAME: &str = "inversiones-cli";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variables that override file settings
pub mod env_keys {
    pub const MEF_ENDPOINT: &str = "MEF_ENDPOINT";
    pub const MEF_TIMEOUT_SECS: &str = "MEF_TIMEOUT_SECS";
    pub const MEF_MAX_RETRIES: &str = "MEF_MAX_RETRIES";
    pub const FIREBASE_DATABASE_URL: &str = "FIREBASE_DATABASE_URL";
    pub const FIREBASE_AUTH: &str = "FIREBASE_AUTH";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub reshape: ReshapeConfig,
    pub publish: PublishConfig,
}

/// `[fetch]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub endpoint: String,
    /// Per-attempt timeout
    pub timeout_secs: u64,
    /// Total attempts per department
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: MEF_REPORT_ENDPOINT.to_string(),
            timeout_secs: 90,
            max_retries: 3,
            retry_base_delay_ms: 0,
            retry_max_delay_ms: 0,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

/// `[reshape]` section: fixed values stamped on every generated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReshapeConfig {
    pub default_description: String,
    pub default_pic_url: String,
    pub default_category_pic_url: String,
    /// Used as `ubicacion` when the investment name names no district or province
    pub default_region: String,
    pub project_id_prefix: String,
}

impl Default for ReshapeConfig {
    fn default() -> Self {
        Self {
            default_description: "Descripción no disponible".to_string(),
            default_pic_url: "https://example.com/default-pic.png".to_string(),
            default_category_pic_url: "https://example.com/default-category-pic.png".to_string(),
            default_region: "AREQUIPA".to_string(),
            project_id_prefix: "proj_".to_string(),
        }
    }
}

/// `[publish]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Realtime Database root, e.g. `https://<project>.firebaseio.com`
    pub database_url: Option<String>,
    /// Database secret or ID token sent as the `auth` query parameter
    pub auth_token: Option<String>,
}

impl Config {
    /// Load configuration from `path`, the default location, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(env_keys::MEF_ENDPOINT) {
            self.fetch.endpoint = endpoint;
        }
        if let Some(timeout) = lookup(env_keys::MEF_TIMEOUT_SECS) {
            self.fetch.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", env_keys::MEF_TIMEOUT_SECS, timeout))?;
        }
        if let Some(retries) = lookup(env_keys::MEF_MAX_RETRIES) {
            self.fetch.max_retries = retries
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", env_keys::MEF_MAX_RETRIES, retries))?;
        }
        if let Some(url) = lookup(env_keys::FIREBASE_DATABASE_URL) {
            self.publish.database_url = Some(url);
        }
        if let Some(token) = lookup(env_keys::FIREBASE_AUTH) {
            self.publish.auth_token = Some(token);
        }
        Ok(())
    }
}
