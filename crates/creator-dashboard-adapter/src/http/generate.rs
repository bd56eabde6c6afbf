/*
[INPUT]:  Topic, content type, optional task id; previously generated content
[OUTPUT]: Tagged generate outcome; publish acknowledgement
[POS]:    HTTP layer - content generation and publishing endpoints
[UPDATE]: When generate/publish payloads or classification change
*/

use crate::http::{CreatorClient, Result};
use crate::types::{Ack, GenerateOutcome, GenerateRequest, RetryPublishRequest};
use reqwest::Method;

impl CreatorClient {
    /// Generate content for a topic and publish it
    ///
    /// POST /api/generate-and-publish
    ///
    /// Transport failures and non-JSON bodies are `Err`; every well-formed
    /// reply, including HTTP error statuses, decodes into a `GenerateOutcome`.
    pub async fn generate_and_publish(&self, req: &GenerateRequest) -> Result<GenerateOutcome> {
        tracing::debug!(
            topic = %req.topic,
            content_type = %req.content_type,
            task_id = ?req.task_id,
            "generate-and-publish request"
        );
        let builder = self
            .request(Method::POST, "/api/generate-and-publish")?
            .json(req);
        let envelope = self.send_envelope(builder).await?;
        GenerateOutcome::from_envelope(&envelope)
    }

    /// Publish already generated content again
    ///
    /// POST /api/retry-publish
    pub async fn retry_publish(&self, req: &RetryPublishRequest) -> Result<Ack> {
        let builder = self.request(Method::POST, "/api/retry-publish")?.json(req);
        let envelope = self.send_envelope(builder).await?;
        Ok(envelope.into_ack())
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, CreatorClient, DashboardError};
    use crate::types::{
        ContentType, GenerateOutcome, GenerateRequest, PUBLISH_SUCCESS_MARKER, RetryPublishRequest,
    };
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CreatorClient {
        CreatorClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init")
    }

    #[tokio::test]
    async fn test_generate_and_publish_success() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/generate-and-publish"))
            .and(body_json(serde_json::json!({
                "topic": "autumn recipes",
                "content_type": "general",
                "task_id": "task-42",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {
                    "title": "Six autumn soups",
                    "content": "Warm bowls...",
                    "tags": ["food", "autumn"],
                    "images": [],
                    "publish_status": PUBLISH_SUCCESS_MARKER,
                    "publish_time": "2026-10-01 12:00:00",
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .generate_and_publish(&GenerateRequest {
                topic: "autumn recipes".to_string(),
                content_type: ContentType::General,
                task_id: Some("task-42".to_string()),
            })
            .await
            .expect("generate_and_publish failed");

        let GenerateOutcome::Success(payload) = outcome else {
            panic!("expected success outcome");
        };
        assert_eq!(payload.title.as_deref(), Some("Six autumn soups"));
        assert_eq!(payload.publish_time.as_deref(), Some("2026-10-01 12:00:00"));
    }

    #[tokio::test]
    async fn test_generate_and_publish_http_error_is_failure_outcome() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/generate-and-publish"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"detail": "请先完成配置"})),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .generate_and_publish(&GenerateRequest {
                topic: "t".to_string(),
                content_type: ContentType::PaperAnalysis,
                task_id: None,
            })
            .await
            .expect("well-formed error reply is not a transport error");

        match outcome {
            GenerateOutcome::Failure(detail) => assert_eq!(detail.message(), "请先完成配置"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_and_publish_plain_text_body() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/generate-and-publish"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_and_publish(&GenerateRequest {
                topic: "t".to_string(),
                content_type: ContentType::General,
                task_id: None,
            })
            .await
            .expect_err("plain text body should fail");

        assert!(matches!(err, DashboardError::InvalidResponse(ref text) if text == "Bad Gateway"));
        assert_eq!(err.detail(), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_retry_publish_sends_content_only() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/retry-publish"))
            .and(body_json(serde_json::json!({
                "title": "Six autumn soups",
                "content": "Warm bowls...",
                "tags": ["food"],
                "images": ["https://img/1.png"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "login expired",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server)
            .retry_publish(&RetryPublishRequest {
                title: Some("Six autumn soups".to_string()),
                content: Some("Warm bowls...".to_string()),
                tags: vec!["food".to_string()],
                images: vec!["https://img/1.png".to_string()],
            })
            .await
            .expect("retry_publish failed");

        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("login expired"));
    }
}
