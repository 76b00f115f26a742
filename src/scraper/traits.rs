use crate::model::{RawFragment, SourceError};
use tracing::{info, warn};

/// One data source: fetches its content and extracts candidate fragments.
#[async_trait::async_trait]
pub trait Source: Send + Sync {
    /// Human-readable label stamped on every deal this source produces.
    fn label(&self) -> &str;

    async fn fetch_fragments(&self) -> Result<Vec<RawFragment>, SourceError>;

    /// Infallible wrapper: failures are logged and yield no fragments.
    async fn fetch(&self) -> Vec<RawFragment> {
        match self.fetch_fragments().await {
            Ok(fragments) => {
                info!("[{}] extracted {} fragments", self.label(), fragments.len());
                fragments
            }
            Err(e) => {
                warn!("[{}] source failed: {}", self.label(), e);
                Vec::new()
            }
        }
    }
}
