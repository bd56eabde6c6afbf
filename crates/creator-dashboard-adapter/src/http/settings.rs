/*
[INPUT]:  Backend configuration values and model credentials
[OUTPUT]: Masked configuration, save/validate acknowledgements
[POS]:    HTTP layer - configuration endpoints
[UPDATE]: When configuration fields or validation flow change
*/

use crate::http::{CreatorClient, Result};
use crate::types::{Ack, DashboardSettings, ValidateModelRequest};
use reqwest::Method;

impl CreatorClient {
    /// Load backend configuration (secrets masked)
    ///
    /// GET /api/config
    pub async fn load_settings(&self) -> Result<DashboardSettings> {
        let builder = self.request(Method::GET, "/api/config")?;
        let envelope = self.send_envelope(builder).await?;
        if !envelope.is_ok() {
            return Err(envelope.into_error());
        }
        envelope.field("config")
    }

    /// Save configuration; only populated, unmasked fields are sent
    ///
    /// POST /api/config
    pub async fn save_settings(&self, settings: &DashboardSettings) -> Result<Ack> {
        let body = settings.without_placeholders();
        let builder = self.request(Method::POST, "/api/config")?.json(&body);
        let envelope = self.send_envelope(builder).await?;
        Ok(envelope.into_ack())
    }

    /// Check that a model answers with the given credentials
    ///
    /// POST /api/validate-model
    pub async fn validate_model(&self, req: &ValidateModelRequest) -> Result<Ack> {
        let builder = self.request(Method::POST, "/api/validate-model")?.json(req);
        let envelope = self.send_envelope(builder).await?;
        Ok(envelope.into_ack())
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, CreatorClient};
    use crate::types::{DashboardSettings, ValidateModelRequest};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_load_settings() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "config": {
                    "ai_platform": "doubao",
                    "llm_api_key": "sk-****1234",
                    "default_model": "doubao-seed-1-8-251228",
                },
            })))
            .mount(&server)
            .await;

        let client = CreatorClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init");
        let settings = client.load_settings().await.expect("load_settings failed");

        assert_eq!(settings.ai_platform.as_deref(), Some("doubao"));
        assert!(settings.has_api_key());
        assert_eq!(settings.xhs_mcp_url, None);
    }

    #[tokio::test]
    async fn test_save_settings_skips_masked_key() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/config"))
            .and(body_json(serde_json::json!({
                "ai_platform": "openai",
                "default_model": "gpt-4o",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "配置保存成功",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CreatorClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init");
        let ack = client
            .save_settings(&DashboardSettings {
                ai_platform: Some("openai".to_string()),
                llm_api_key: Some("sk-****1234".to_string()),
                default_model: Some("gpt-4o".to_string()),
                ..Default::default()
            })
            .await
            .expect("save_settings failed");

        assert!(ack.success);
    }

    #[tokio::test]
    async fn test_validate_model_rejected() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/validate-model"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "401 invalid key"})),
            )
            .mount(&server)
            .await;

        let client = CreatorClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
            .expect("client init");
        let ack = client
            .validate_model(&ValidateModelRequest {
                llm_api_key: "sk-bad".to_string(),
                openai_base_url: "https://api.openai.com/v1".to_string(),
                model_name: "gpt-4o".to_string(),
            })
            .await
            .expect("validate_model failed");

        assert!(!ack.success);
        assert_eq!(ack.message.as_deref(), Some("401 invalid key"));
    }
}
