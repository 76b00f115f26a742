// notifier/telegram.rs

use crate::config::TelegramConfig;
use crate::model::PublishError;
use crate::notifier::Publisher;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts messages to a chat through the Telegram Bot API.
pub struct TelegramPublisher {
    bot_token: String,
    chat_id: i64,
    api_base: String,
    client: Client,
}

impl TelegramPublisher {
    pub fn new(config: &TelegramConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| PublishError::Api(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn send_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait::async_trait]
impl Publisher for TelegramPublisher {
    async fn publish(&self, message: &str) -> Result<(), PublishError> {
        info!("📤 Sending Telegram message ({} chars)", message.chars().count());
        let params = [
            ("chat_id", self.chat_id.to_string()),
            ("text", message.to_string()),
        ];

        let response = match timeout(
            SEND_TIMEOUT,
            self.client.post(self.send_url()).form(&params).send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) if e.is_timeout() || e.is_connect() => {
                warn!("❌ Telegram send() failed: {}", e);
                return Err(PublishError::Unreachable);
            }
            Ok(Err(e)) => {
                warn!("❌ Telegram send() failed: {}", e);
                return Err(PublishError::Api(format!("send failed: {e}")));
            }
            Err(_) => {
                warn!("⏳ Telegram send() timed out");
                return Err(PublishError::Unreachable);
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "unknown".into());
        if status.is_success() {
            info!("✅ Telegram response [{}]", status);
            return Ok(());
        }

        warn!("❌ Telegram API responded [{}]: {}", status, body);
        Err(match status {
            StatusCode::UNAUTHORIZED => PublishError::AuthRejected,
            StatusCode::FORBIDDEN => PublishError::InsufficientAccess,
            StatusCode::TOO_MANY_REQUESTS => PublishError::RateLimited,
            _ => PublishError::Api(format!("[{status}] {body}")),
        })
    }
}
