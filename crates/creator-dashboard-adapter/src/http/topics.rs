/*
[INPUT]:  Domain keyword or source URL
[OUTPUT]: Candidate topics for batch generation
[POS]:    HTTP layer - topic discovery endpoints
[UPDATE]: When discovery endpoints or topic shape change
*/

use crate::http::{CreatorClient, Result};
use crate::types::{TopicSuggestion, TopicsFromUrlRequest, TrendingTopicsRequest};
use reqwest::Method;

impl CreatorClient {
    /// Fetch today's trending topics for a domain
    ///
    /// POST /api/fetch-trending-topics
    pub async fn fetch_trending_topics(&self, domain: &str) -> Result<Vec<TopicSuggestion>> {
        let req = TrendingTopicsRequest {
            domain: domain.to_string(),
        };
        let builder = self
            .request(Method::POST, "/api/fetch-trending-topics")?
            .json(&req);
        self.send_topics(builder).await
    }

    /// Crawl a page and extract topics from it
    ///
    /// POST /api/fetch-topics-from-url
    pub async fn fetch_topics_from_url(&self, url: &str) -> Result<Vec<TopicSuggestion>> {
        let req = TopicsFromUrlRequest {
            url: url.to_string(),
        };
        let builder = self
            .request(Method::POST, "/api/fetch-topics-from-url")?
            .json(&req);
        self.send_topics(builder).await
    }

    async fn send_topics(&self, builder: reqwest::RequestBuilder) -> Result<Vec<TopicSuggestion>> {
        let envelope = self.send_envelope(builder).await?;
        if !envelope.is_ok() {
            return Err(envelope.into_error());
        }
        envelope.field("topics")
    }
}
