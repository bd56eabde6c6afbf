/*
[INPUT]:  Scripted backend replies and controller timings
[OUTPUT]: FakeBackend, controller fixtures and payload builders
[POS]:    Test infrastructure - shared across controller test suites
[UPDATE]: When ContentBackend gains methods or new reply shapes are needed
*/

#![allow(dead_code)]

//! Common test utilities for creator-dashboard tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use creator_dashboard::{ContentBackend, ControllerConfig, RecordingSurface, TaskController};
use creator_dashboard_adapter::{
    Ack, ContentPayload, DashboardError, DashboardSettings, GenerateOutcome, GenerateRequest,
    HistoryRecord, HistoryStatus, PUBLISH_SUCCESS_MARKER, Result, RetryPublishRequest,
    TopicSuggestion, ValidateModelRequest,
};
use tokio::time::Instant;

/// What the next generate call does
pub enum Reply {
    Outcome(GenerateOutcome),
    Error(DashboardError),
    /// Answer after a delay
    Delayed(Duration, GenerateOutcome),
    /// Never answer
    Pending,
}

#[derive(Debug, Clone)]
pub struct GenerateCall {
    pub request: GenerateRequest,
    pub at: Instant,
}

/// In-memory backend with scripted generate replies.
///
/// Replies scripted for a topic win over the shared queue; generate calls
/// without any scripted reply stay pending.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<VecDeque<Reply>>,
    topic_replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<GenerateCall>>,
    publish_acks: Mutex<VecDeque<Ack>>,
    publish_calls: Mutex<Vec<RetryPublishRequest>>,
    publish_delay: Mutex<Option<Duration>>,
    topics: Mutex<Vec<TopicSuggestion>>,
    topic_calls: Mutex<usize>,
    records: Mutex<Vec<HistoryRecord>>,
    history_calls: Mutex<Vec<u32>>,
    settings: Mutex<DashboardSettings>,
    saved: Mutex<Vec<DashboardSettings>>,
    model_ack: Mutex<Option<Ack>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Script a reply for calls about `topic` only
    pub fn push_for(&self, topic: &str, reply: Reply) {
        self.topic_replies
            .lock()
            .unwrap()
            .entry(topic.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn push_publish_ack(&self, ack: Ack) {
        self.publish_acks.lock().unwrap().push_back(ack);
    }

    /// Hold every retry-publish answer for `delay`
    pub fn set_publish_delay(&self, delay: Duration) {
        *self.publish_delay.lock().unwrap() = Some(delay);
    }

    pub fn publish_calls(&self) -> Vec<RetryPublishRequest> {
        self.publish_calls.lock().unwrap().clone()
    }

    pub fn set_topics(&self, topics: Vec<TopicSuggestion>) {
        *self.topics.lock().unwrap() = topics;
    }

    pub fn topic_calls(&self) -> usize {
        *self.topic_calls.lock().unwrap()
    }

    pub fn set_records(&self, records: Vec<HistoryRecord>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn history_calls(&self) -> Vec<u32> {
        self.history_calls.lock().unwrap().clone()
    }

    pub fn set_settings(&self, settings: DashboardSettings) {
        *self.settings.lock().unwrap() = settings;
    }

    pub fn saved(&self) -> Vec<DashboardSettings> {
        self.saved.lock().unwrap().clone()
    }

    pub fn set_model_ack(&self, ack: Ack) {
        *self.model_ack.lock().unwrap() = Some(ack);
    }
}

#[async_trait]
impl ContentBackend for FakeBackend {
    async fn generate_and_publish(&self, req: &GenerateRequest) -> Result<GenerateOutcome> {
        self.calls.lock().unwrap().push(GenerateCall {
            request: req.clone(),
            at: Instant::now(),
        });
        let scripted = self
            .topic_replies
            .lock()
            .unwrap()
            .get_mut(&req.topic)
            .and_then(VecDeque::pop_front);
        let reply = scripted.or_else(|| self.replies.lock().unwrap().pop_front());
        match reply {
            Some(Reply::Outcome(outcome)) => Ok(outcome),
            Some(Reply::Error(err)) => Err(err),
            Some(Reply::Delayed(delay, outcome)) => {
                tokio::time::sleep(delay).await;
                Ok(outcome)
            }
            Some(Reply::Pending) | None => std::future::pending().await,
        }
    }

    async fn retry_publish(&self, req: &RetryPublishRequest) -> Result<Ack> {
        self.publish_calls.lock().unwrap().push(req.clone());
        let delay = *self.publish_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let ack = self.publish_acks.lock().unwrap().pop_front();
        Ok(ack.unwrap_or_else(|| ack_ok("发布成功")))
    }

    async fn fetch_trending_topics(&self, _domain: &str) -> Result<Vec<TopicSuggestion>> {
        *self.topic_calls.lock().unwrap() += 1;
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn fetch_topics_from_url(&self, _url: &str) -> Result<Vec<TopicSuggestion>> {
        *self.topic_calls.lock().unwrap() += 1;
        Ok(self.topics.lock().unwrap().clone())
    }

    async fn load_settings(&self) -> Result<DashboardSettings> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save_settings(&self, settings: &DashboardSettings) -> Result<Ack> {
        self.saved.lock().unwrap().push(settings.without_placeholders());
        Ok(ack_ok("配置保存成功"))
    }

    async fn validate_model(&self, _req: &ValidateModelRequest) -> Result<Ack> {
        Ok(self
            .model_ack
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ack_ok("ok")))
    }

    async fn history(&self, limit: u32) -> Result<Vec<HistoryRecord>> {
        self.history_calls.lock().unwrap().push(limit);
        let records = self.records.lock().unwrap();
        Ok(records.iter().take(limit as usize).cloned().collect())
    }

    async fn delete_history(&self, task_id: &str) -> Result<Ack> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.identity() != Some(task_id));
        if records.len() == before {
            return Ok(Ack {
                success: false,
                message: Some("任务不存在".to_string()),
            });
        }
        Ok(ack_ok("删除成功"))
    }
}

pub fn ack_ok(message: &str) -> Ack {
    Ack {
        success: true,
        message: Some(message.to_string()),
    }
}

/// Controller with default timings over a fake backend and recording surface
pub fn controller_with(
    backend: Arc<FakeBackend>,
    config: ControllerConfig,
) -> (TaskController, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::new());
    let controller = TaskController::new(backend, surface.clone(), config);
    (controller, surface)
}

pub fn published(title: &str) -> ContentPayload {
    ContentPayload {
        title: Some(title.to_string()),
        content: Some(format!("{title} body")),
        tags: vec!["creator".to_string()],
        images: vec!["https://img.example/1.png".to_string()],
        publish_status: Some(PUBLISH_SUCCESS_MARKER.to_string()),
        publish_time: Some("2026-10-18 09:00:00".to_string()),
    }
}

pub fn unpublished(title: &str, status: &str) -> ContentPayload {
    ContentPayload {
        publish_status: Some(status.to_string()),
        publish_time: None,
        ..published(title)
    }
}

pub fn topic(title: &str) -> TopicSuggestion {
    TopicSuggestion {
        title: title.to_string(),
        summary: format!("about {title}"),
    }
}

pub fn record(id: &str, status: HistoryStatus, created_at: &str) -> HistoryRecord {
    HistoryRecord {
        id: Some(id.to_string()),
        task_id: Some(id.to_string()),
        topic: format!("topic {id}"),
        status,
        content_type: Some("general".to_string()),
        created_at: Some(created_at.to_string()),
        message: None,
        payload: ContentPayload::default(),
    }
}
