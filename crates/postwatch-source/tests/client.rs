//! Integration tests for `PostSourceClient` against a wiremock server.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use postwatch_source::{ErrorKind, PostSourceClient, RetryPolicy, SourceError, DEFAULT_TITLE};

fn test_client(base_url: &str, max_attempts: u32) -> PostSourceClient {
    PostSourceClient::new(
        base_url,
        5,
        "postwatch-test/0.1",
        RetryPolicy::new(max_attempts, Duration::ZERO),
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_latest_returns_newest_post() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/93759290"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "101", "title": "Chapter 12"},
            {"id": "100", "title": "Chapter 11"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let post = client
        .fetch_latest("patreon", "93759290")
        .await
        .expect("fetch should succeed")
        .expect("feed is not empty");

    assert_eq!(post.id, "101");
    assert_eq!(post.title, "Chapter 12");
}

#[tokio::test]
async fn fetch_latest_returns_none_for_empty_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let result = client.fetch_latest("patreon", "1").await;
    assert!(matches!(result, Ok(None)), "got: {result:?}");
}

#[tokio::test]
async fn fetch_latest_defaults_missing_title() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fanbox/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 555}])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 1);
    let post = client.fetch_latest("fanbox", "7").await.unwrap().unwrap();
    assert_eq!(post.id, "555");
    assert_eq!(post.title, DEFAULT_TITLE);
}

#[tokio::test]
async fn server_errors_are_retried_up_to_the_bound() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let err = client.fetch_latest("patreon", "1").await.unwrap_err();

    assert!(
        matches!(err, SourceError::UnexpectedStatus { status: 503, .. }),
        "got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn not_found_is_a_network_class_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 2);
    let err = client.fetch_latest("patreon", "404").await.unwrap_err();
    assert!(err.is_retriable());
}

#[tokio::test]
async fn transient_failure_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/1"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "9", "title": "ok"}])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let post = client.fetch_latest("patreon", "1").await.unwrap().unwrap();
    assert_eq!(post.id, "9");
}

#[tokio::test]
async fn timeout_is_retried_and_reported_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = PostSourceClient::new(
        &server.uri(),
        1,
        "postwatch-test/0.1",
        RetryPolicy::new(2, Duration::ZERO),
    )
    .unwrap();

    let err = client.fetch_latest("patreon", "slow").await.unwrap_err();
    assert!(
        matches!(err, SourceError::Http(ref e) if e.is_timeout()),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_post_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "no id here"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let err = client.fetch_latest("patreon", "1").await.unwrap_err();
    assert!(matches!(err, SourceError::MalformedPost { .. }), "got: {err:?}");
    assert_eq!(err.kind(), ErrorKind::Data);
}

#[tokio::test]
async fn invalid_json_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/patreon/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let err = client.fetch_latest("patreon", "1").await.unwrap_err();
    assert!(matches!(err, SourceError::Deserialize { .. }), "got: {err:?}");
}
