// Core structs: Deal, RawFragment, and the error enums shared across the pipeline
use serde::Serialize;
use thiserror::Error;

/// Label stamped on every entry of the synthetic fallback catalog.
pub const FALLBACK_SOURCE_LABEL: &str = "Example Deal (fallback)";

/// A discounted game, normalized and ready for ranking and formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deal {
    pub name: String,
    pub discount_percent: u32,
    pub raw_discount_text: String,
    pub price: String,
    pub original_price: Option<String>,
    pub description: Option<String>,
    pub source_url: Option<String>,
    pub source_label: String,
}

impl Deal {
    /// Case-insensitive, whitespace-normalized identity used for deduplication.
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name)
    }

    pub fn is_synthetic(&self) -> bool {
        self.source_label == FALLBACK_SOURCE_LABEL
    }
}

pub fn dedup_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Unvalidated candidate pulled out of a source before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFragment {
    pub name: String,
    pub discount_text: String,
    pub price: String,
    pub original_price: Option<String>,
    pub source_url: Option<String>,
    pub description: Option<String>,
    /// Name comes from a structured feed and is taken as-is; only scraped
    /// titles carry sibling-text bleed worth stripping.
    pub exact_name: bool,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid selector: {0}")]
    Selector(String),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParserError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("account access tier does not allow posting")]
    InsufficientAccess,
    #[error("credentials were rejected")]
    AuthRejected,
    #[error("rate limited")]
    RateLimited,
    #[error("API error: {0}")]
    Api(String),
    #[error("publisher unreachable")]
    Unreachable,
}
