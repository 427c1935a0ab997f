//! Configuration management with layered hierarchy
//!
//! Defaults, then the user config file, then environment variables, then
//! CLI flags (applied by the command). The bearer token is the only
//! secret; it is read once at startup and never written or logged.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Production API root of the quoting service.
pub const DEFAULT_BASE_URL: &str = "https://api.fulcrumpro.com/api";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read token file {path}: {source}")]
    TokenFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("token file {path} is empty")]
    EmptyToken { path: String },

    #[error(
        "no API token configured; pass --token, set STOCKROLL_TOKEN, \
         or point --token-file at a credential file"
    )]
    MissingToken,
}

/// Rollup CLI configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL override.
    pub base_url: Option<String>,

    /// Path to the bearer token file.
    pub token_file: Option<PathBuf>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Retry attempts per upstream call.
    pub retries: Option<u32>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order.
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/stockroll/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(base_url) = std::env::var("STOCKROLL_BASE_URL") {
            config.base_url = Some(base_url);
        }
        if let Ok(token_file) = std::env::var("STOCKROLL_TOKEN_FILE") {
            config.token_file = Some(PathBuf::from(token_file));
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stockroll")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.token_file.is_some() {
            self.token_file = other.token_file;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.retries.is_some() {
            self.retries = other.retries;
        }
    }

    pub fn base_url(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self, flag: Option<u64>) -> Duration {
        Duration::from_secs(flag.or(self.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn retries(&self, flag: Option<u32>) -> u32 {
        flag.or(self.retries).unwrap_or(DEFAULT_RETRIES).max(1)
    }

    /// Resolve the bearer token: an explicit token wins, then a token
    /// file from the flag or the config.
    pub fn token(
        &self,
        flag_token: Option<&str>,
        flag_file: Option<&Path>,
    ) -> Result<String, ConfigError> {
        if let Some(token) = flag_token {
            return Ok(token.trim().to_string());
        }

        let path = flag_file.or(self.token_file.as_deref());
        match path {
            Some(path) => read_token_file(path),
            None => Err(ConfigError::MissingToken),
        }
    }
}

fn read_token_file(path: &Path) -> Result<String, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::TokenFileRead {
        path: path.display().to_string(),
        source,
    })?;

    let token = contents.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyToken {
            path: path.display().to_string(),
        });
    }
    Ok(token.to_string())
}
