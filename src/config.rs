use crate::model::ConfigError;
use crate::scraper::fetcher::DEFAULT_USER_AGENT;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_STORE_BASE: &str = "https://store.steampowered.com";

/// Tunables consumed by the deal pipeline. The pipeline never reads files or
/// environment variables itself; callers hand it this value.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub store_base_url: String,
    pub country_code: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub source_timeout_secs: u64,
    pub deadline_secs: u64,
    pub digest_size: usize,
    pub enrich_descriptions: bool,
    pub enrich_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            store_base_url: DEFAULT_STORE_BASE.to_string(),
            country_code: "us".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 10,
            source_timeout_secs: 15,
            deadline_secs: 30,
            digest_size: 3,
            enrich_descriptions: true,
            enrich_limit: 3,
        }
    }
}

impl PipelineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: i64,
    #[serde(default = "default_telegram_api")]
    pub api_base: String,
}

fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    /// Whether synthetic fallback deals may be published, not just displayed.
    pub allow_fallback_posting: bool,
    pub telegram: Option<TelegramConfig>,
    pub pipeline: PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            allow_fallback_posting: false,
            telegram: None,
            pipeline: PipelineConfig::default(),
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}
