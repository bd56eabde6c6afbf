/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use common::{client_for, published_reply, setup_mock_server};
use creator_dashboard_adapter::{
    ClientConfig, ContentType, CreatorClient, DashboardError, GenerateOutcome, GenerateRequest,
};
use std::time::Duration;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(CreatorClient::new());
    assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8083/");
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        connect_timeout: Duration::from_secs(2),
        request_timeout: Some(Duration::from_secs(60)),
    };
    let _client = assert_ok!(CreatorClient::with_config(config));
}

#[tokio::test]
async fn test_generate_round_trip_against_mock() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-and-publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(published_reply("Trail guide")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = assert_ok!(
        client_for(&server)
            .generate_and_publish(&GenerateRequest {
                topic: "hiking".to_string(),
                content_type: ContentType::General,
                task_id: None,
            })
            .await
    );
    assert!(matches!(
        outcome,
        GenerateOutcome::Success(ref p) if p.title.as_deref() == Some("Trail guide")
    ));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Bind then drop a listener so the port is closed.
    let uri = {
        let listener = assert_ok!(std::net::TcpListener::bind("127.0.0.1:0"));
        format!("http://{}", assert_ok!(listener.local_addr()))
    };
    let client = assert_ok!(CreatorClient::with_config_and_base_url(
        ClientConfig::default(),
        &uri
    ));

    let err = client
        .generate_and_publish(&GenerateRequest {
            topic: "hiking".to_string(),
            content_type: ContentType::General,
            task_id: None,
        })
        .await
        .expect_err("closed port should fail");

    assert!(matches!(err, DashboardError::Http(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_empty_non_json_body_gets_placeholder_detail() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/retry-publish"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .retry_publish(&creator_dashboard_adapter::RetryPublishRequest {
            title: None,
            content: None,
            tags: vec![],
            images: vec![],
        })
        .await
        .expect_err("empty body should fail");

    assert_eq!(err.detail(), "server returned an invalid JSON response");
}
