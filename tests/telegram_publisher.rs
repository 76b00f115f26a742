//! Status handling of the Telegram publisher against a mock Bot API.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use deal_sniper::config::TelegramConfig;
use deal_sniper::model::PublishError;
use deal_sniper::notifier::{Publisher, TelegramPublisher};

const TOKEN: &str = "test-token";

fn publisher_for(server: &MockServer) -> TelegramPublisher {
    TelegramPublisher::new(&TelegramConfig {
        bot_token: TOKEN.to_string(),
        chat_id: 4242,
        api_base: server.uri(),
    })
    .expect("publisher")
}

async fn respond_with(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(status).set_body_string(r#"{"ok":false}"#))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn posts_the_message_to_the_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_string_contains("chat_id=4242"))
        .and(body_string_contains("Hades"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    publisher_for(&server)
        .publish("🏷️Hades -50% off!")
        .await
        .expect("publish succeeds");
}

#[tokio::test]
async fn maps_rejections_to_typed_errors() {
    let server = respond_with(401).await;
    assert!(matches!(
        publisher_for(&server).publish("x").await,
        Err(PublishError::AuthRejected)
    ));

    let server = respond_with(403).await;
    assert!(matches!(
        publisher_for(&server).publish("x").await,
        Err(PublishError::InsufficientAccess)
    ));

    let server = respond_with(429).await;
    assert!(matches!(
        publisher_for(&server).publish("x").await,
        Err(PublishError::RateLimited)
    ));

    let server = respond_with(400).await;
    match publisher_for(&server).publish("x").await {
        Err(PublishError::Api(detail)) => assert!(detail.contains("400")),
        other => panic!("expected Api error, got {other:?}"),
    }
}
