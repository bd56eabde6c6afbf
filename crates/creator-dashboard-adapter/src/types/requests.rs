/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::ContentType;
use super::models::ContentPayload;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub content_type: ContentType,
    /// Present on retries so the backend updates the existing record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPublishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl From<&ContentPayload> for RetryPublishRequest {
    fn from(payload: &ContentPayload) -> Self {
        Self {
            title: payload.title.clone(),
            content: payload.content.clone(),
            tags: payload.tags.clone(),
            images: payload.images.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTopicsRequest {
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicsFromUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateModelRequest {
    pub llm_api_key: String,
    pub openai_base_url: String,
    pub model_name: String,
}
