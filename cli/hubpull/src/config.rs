//! Configuration resolution.
//!
//! Settings come from, in order of precedence:
//! - command-line flags
//! - environment variables (handled by clap)
//! - the config file (`--config`, or `config.json` in the platform config
//!   directory)
//! - built-in defaults
//!
//! The API key is only ever taken from a flag or the environment. It is never
//! read from or written to the config file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use hubpull_registry::{ConfigError, Credentials, HubConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
use hubpull_runtime::DEFAULT_RUNTIME_BINARY;
use serde::{Deserialize, Serialize};

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Get the default config file path.
pub fn config_path() -> Result<PathBuf> {
    ProjectDirs::from("io", "hubpull", "hubpull")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// The config file to use: `explicit` if given, else the default location.
pub fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path(),
    }
}

/// Contents of the config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    /// Registry username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Container runtime binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load a config file from `path`, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub runtime: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub api_url: String,
    pub runtime: String,
    pub timeout: Duration,
}

impl Settings {
    /// Merge overrides on top of the config file and defaults.
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Self {
        Self {
            username: overrides.username.or(file.username),
            api_key: overrides.api_key,
            api_url: overrides
                .api_url
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            runtime: overrides
                .runtime
                .or(file.runtime)
                .unwrap_or_else(|| DEFAULT_RUNTIME_BINARY.to_string()),
            timeout: overrides
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    /// Build the registry client configuration.
    ///
    /// Fails if the username or API key is missing.
    pub fn hub_config(&self) -> Result<HubConfig, ConfigError> {
        let credentials = Credentials::resolve(self.username.clone(), self.api_key.clone())?;
        Ok(HubConfig::new(credentials)
            .with_api_url(self.api_url.as_str())
            .with_timeout(self.timeout))
    }
}
