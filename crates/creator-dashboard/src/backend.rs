/*
[INPUT]:  Controller requests for generation, publishing, discovery, settings, history
[OUTPUT]: ContentBackend trait and its CreatorClient implementation
[POS]:    Integration seam - the controller only sees this trait
[UPDATE]: When the controller needs another backend endpoint
*/

use async_trait::async_trait;
use creator_dashboard_adapter::{
    Ack, CreatorClient, DashboardSettings, GenerateOutcome, GenerateRequest, HistoryRecord,
    Result, RetryPublishRequest, TopicSuggestion, ValidateModelRequest,
};

/// Backend operations the controller depends on
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn generate_and_publish(&self, req: &GenerateRequest) -> Result<GenerateOutcome>;

    async fn retry_publish(&self, req: &RetryPublishRequest) -> Result<Ack>;

    async fn fetch_trending_topics(&self, domain: &str) -> Result<Vec<TopicSuggestion>>;

    async fn fetch_topics_from_url(&self, url: &str) -> Result<Vec<TopicSuggestion>>;

    async fn load_settings(&self) -> Result<DashboardSettings>;

    async fn save_settings(&self, settings: &DashboardSettings) -> Result<Ack>;

    async fn validate_model(&self, req: &ValidateModelRequest) -> Result<Ack>;

    async fn history(&self, limit: u32) -> Result<Vec<HistoryRecord>>;

    async fn delete_history(&self, task_id: &str) -> Result<Ack>;
}

#[async_trait]
impl ContentBackend for CreatorClient {
    async fn generate_and_publish(&self, req: &GenerateRequest) -> Result<GenerateOutcome> {
        CreatorClient::generate_and_publish(self, req).await
    }

    async fn retry_publish(&self, req: &RetryPublishRequest) -> Result<Ack> {
        CreatorClient::retry_publish(self, req).await
    }

    async fn fetch_trending_topics(&self, domain: &str) -> Result<Vec<TopicSuggestion>> {
        CreatorClient::fetch_trending_topics(self, domain).await
    }

    async fn fetch_topics_from_url(&self, url: &str) -> Result<Vec<TopicSuggestion>> {
        CreatorClient::fetch_topics_from_url(self, url).await
    }

    async fn load_settings(&self) -> Result<DashboardSettings> {
        CreatorClient::load_settings(self).await
    }

    async fn save_settings(&self, settings: &DashboardSettings) -> Result<Ack> {
        CreatorClient::save_settings(self, settings).await
    }

    async fn validate_model(&self, req: &ValidateModelRequest) -> Result<Ack> {
        CreatorClient::validate_model(self, req).await
    }

    async fn history(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        CreatorClient::history(self, limit).await
    }

    async fn delete_history(&self, task_id: &str) -> Result<Ack> {
        CreatorClient::delete_history(self, task_id).await
    }
}
