pub mod console;
pub mod telegram;

use crate::model::PublishError;

pub use console::StdoutPublisher;
pub use telegram::TelegramPublisher;

/// Anything that can post a finished message. Publishing is fire-and-forget:
/// implementations do not retry.
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, message: &str) -> Result<(), PublishError>;
}
