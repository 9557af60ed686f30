//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;
use crate::application::formatting::DEFAULT_MAX_RESULTS;

/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable holding the Gopher API bearer token
pub const GOPHER_API_KEY_ENV: &str = "GOPHER_API_KEY";
/// Environment variable overriding the Gopher search endpoint
pub const GOPHER_API_URL_ENV: &str = "GOPHER_API_URL";

/// Default live search endpoint
pub const DEFAULT_GOPHER_ENDPOINT: &str = "https://data.gopher-ai.com/api/v1/search/live";

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub gopher: GopherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GopherConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_results: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Gopher Explore Bot".to_string(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            poll_timeout_secs: 30,
        }
    }
}

impl Default for GopherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_GOPHER_ENDPOINT.to_string(),
            timeout_secs: 15,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl GopherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Overlay credentials from `lookup`; empty values count as unset
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(token) = get(TELEGRAM_TOKEN_ENV) {
            self.telegram.token = Some(token);
        }
        if let Some(key) = get(GOPHER_API_KEY_ENV) {
            self.gopher.api_key = Some(key);
        }
        if let Some(url) = get(GOPHER_API_URL_ENV) {
            self.gopher.endpoint = url;
        }
    }

    /// The transport credential; its absence is fatal for `run`
    pub fn telegram_token(&self) -> Result<&str, ConfigError> {
        self.telegram
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConfigError::MissingField(TELEGRAM_TOKEN_ENV.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gopher.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("gopher.timeout-secs must be positive".to_string()));
        }
        if self.gopher.max_results == 0 {
            return Err(ConfigError::InvalidValue("gopher.max-results must be positive".to_string()));
        }
        if !self.gopher.endpoint.starts_with("http://") && !self.gopher.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue(format!(
                "gopher.endpoint is not an http(s) URL: {}",
                self.gopher.endpoint
            )));
        }
        Ok(())
    }
}
