use crate::model::PublishError;
use crate::notifier::Publisher;

/// Dry-run publisher: prints the message to stdout.
pub struct StdoutPublisher;

#[async_trait::async_trait]
impl Publisher for StdoutPublisher {
    async fn publish(&self, message: &str) -> Result<(), PublishError> {
        println!("{message}");
        println!("({} characters)", message.chars().count());
        Ok(())
    }
}
