/*
[INPUT]:  Generated content payloads from live tasks or history records
[OUTPUT]: Display-ready result view with publish state
[POS]:    Presentation model - result modal contents
[UPDATE]: When result fields or the retry-publish affordance change
*/

use chrono::{DateTime, Local};
use creator_dashboard_adapter::{ContentPayload, PUBLISH_SUCCESS_MARKER};

const UNTITLED: &str = "Untitled";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishState {
    Published,
    /// Anything other than the success marker, including a missing status
    NotPublished(Option<String>),
}

impl PublishState {
    fn from_payload(payload: &ContentPayload) -> Self {
        if payload.is_published() {
            PublishState::Published
        } else {
            PublishState::NotPublished(payload.publish_status.clone())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PublishState::Published => PUBLISH_SUCCESS_MARKER,
            PublishState::NotPublished(Some(status)) if !status.is_empty() => status,
            PublishState::NotPublished(_) => "not published",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub title: String,
    pub timestamp: String,
    pub body: String,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub publish_state: PublishState,
    payload: ContentPayload,
}

impl ResultView {
    /// Build a view; `now` stands in for a missing publish time
    pub fn from_payload(payload: ContentPayload, now: DateTime<Local>) -> Self {
        let title = payload
            .title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let timestamp = payload
            .publish_time
            .clone()
            .filter(|time| !time.trim().is_empty())
            .unwrap_or_else(|| now.format(TIMESTAMP_FORMAT).to_string());

        Self {
            title,
            timestamp,
            body: payload.content.clone().unwrap_or_default(),
            tags: payload.tags.clone(),
            images: payload.images.clone(),
            publish_state: PublishState::from_payload(&payload),
            payload,
        }
    }

    /// Retry-publish is offered until the content is live
    pub fn can_retry_publish(&self) -> bool {
        self.publish_state != PublishState::Published
    }

    pub fn payload(&self) -> &ContentPayload {
        &self.payload
    }

    /// Apply a successful retry-publish in place
    pub fn mark_published(&mut self, now: DateTime<Local>) {
        self.payload.publish_status = Some(PUBLISH_SUCCESS_MARKER.to_string());
        self.payload.publish_time = Some(now.format(TIMESTAMP_FORMAT).to_string());
        self.publish_state = PublishState::Published;
        self.timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    }
}
