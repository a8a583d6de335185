//! Integration tests for `WebhookNotifier` using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postwatch_notify::{NotifyError, WebhookNotifier};

fn notifier_for(server: &MockServer) -> WebhookNotifier {
    WebhookNotifier::new(
        Some(format!("{}/api/webhooks/1/token", server.uri())),
        5,
        "postwatch-test/0.1",
    )
    .expect("notifier construction should not fail")
}

#[tokio::test]
async fn notify_returns_true_on_204() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/webhooks/1/token"))
        .and(body_json(json!({
            "content": "hello",
            "allowed_mentions": {"parse": []}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(notifier_for(&server).notify("hello", false).await);
}

#[tokio::test]
async fn urgent_notify_sends_broadcast_mention() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_json(json!({
            "content": "@everyone\nNew post",
            "allowed_mentions": {"parse": ["everyone"]}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(notifier_for(&server).notify("New post", true).await);
}

#[tokio::test]
async fn status_200_is_not_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\": \"1\"}"))
        .mount(&server)
        .await;

    let notifier = notifier_for(&server);
    assert!(!notifier.notify("hello", false).await);
    let err = notifier.try_notify("hello", false).await.unwrap_err();
    assert!(
        matches!(err, NotifyError::UnexpectedStatus { status: 200, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn error_status_carries_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("{\"message\": \"Cannot send an empty message\"}"),
        )
        .mount(&server)
        .await;

    let err = notifier_for(&server)
        .try_notify("hello", false)
        .await
        .unwrap_err();
    match err {
        NotifyError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Cannot send an empty message"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_url_short_circuits_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = WebhookNotifier::new(None, 5, "postwatch-test/0.1").unwrap();
    assert!(!notifier.is_configured());
    assert!(!notifier.notify("hello", true).await);
    assert!(matches!(
        notifier.try_notify("hello", true).await,
        Err(NotifyError::MissingWebhookUrl)
    ));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn unreachable_webhook_is_http_error() {
    let notifier = WebhookNotifier::new(
        Some("http://127.0.0.1:1/api/webhooks/1/token".to_owned()),
        2,
        "postwatch-test/0.1",
    )
    .unwrap();
    assert!(matches!(
        notifier.try_notify("hello", false).await,
        Err(NotifyError::Http(_))
    ));
}
