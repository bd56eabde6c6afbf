/*
[INPUT]:  Topic submissions, retries, batch selections; ContentBackend; RenderSurface
[OUTPUT]: Spawned task lifecycles that drive cards, toasts and result views
[POS]:    Execution layer - generate-and-publish task orchestration
[UPDATE]: When changing lifecycle classification, retry or batch semantics
[UPDATE]: 2026-10-05 Give every task a child cancellation token of the controller shutdown
[UPDATE]: 2026-10-09 Run the progress simulator as its own tokio task
*/

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;
use creator_dashboard_adapter::{
    ContentPayload, ContentType, DashboardError, GenerateOutcome, GenerateRequest,
    RetryPublishRequest,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::ContentBackend;
use crate::config::{ControllerConfig, DEFAULT_HISTORY_LIMIT};
use crate::error::{ControllerError, Result};
use crate::history::HistoryView;
use crate::progress::{self, Milestone, Tick};
use crate::render::{RenderSurface, ToastLevel};
use crate::result_view::ResultView;
use crate::selection::SelectionState;
use crate::task::{Advance, CardRef, Task, TaskBoard, TaskId, TaskStatus};

const EMPTY_TOPIC_TOAST: &str = "Please enter a topic";
const SUCCESS_CARD_MESSAGE: &str = "Published successfully";
const SUCCESS_TOAST: &str = "Content created";
const PARTIAL_CARD_MESSAGE: &str = "Publish failed";
const PARTIAL_TOAST: &str = "Content generated, but publishing failed";
const STRUCTURED_FAILURE_TOAST: &str = "Generation failed, see details";
const UNKNOWN_ERROR: &str = "unknown error";

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Topic input box and content-type selector of the creation view
#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub input: String,
    pub content_type: ContentType,
}

/// Arguments of a task launch
#[derive(Debug, Clone, Default)]
pub struct StartTask {
    /// `None` reads the composer input and clears it on launch
    pub topic: Option<String>,
    /// `None` uses the composer selection
    pub content_type: Option<ContentType>,
    /// Set on retries so the backend updates the original record
    pub existing_id: Option<TaskId>,
}

impl StartTask {
    /// Submit whatever is in the composer
    pub fn from_composer() -> Self {
        Self::default()
    }

    pub fn topic(topic: impl Into<String>, content_type: Option<ContentType>) -> Self {
        Self {
            topic: Some(topic.into()),
            content_type,
            existing_id: None,
        }
    }

    pub fn retry(topic: impl Into<String>, content_type: Option<ContentType>, id: TaskId) -> Self {
        Self {
            topic: Some(topic.into()),
            content_type,
            existing_id: Some(id),
        }
    }
}

/// Running lifecycle of one launched task
#[derive(Debug)]
pub struct TaskHandle {
    pub id: TaskId,
    join: JoinHandle<Option<TaskStatus>>,
}

impl TaskHandle {
    /// Final status, or `None` when the task was cancelled
    pub async fn wait(self) -> Option<TaskStatus> {
        match self.join.await {
            Ok(status) => status,
            Err(err) => {
                warn!(task_id = %self.id, error = %err, "task lifecycle ended abnormally");
                None
            }
        }
    }
}

/// How a settled lifecycle should present its payload
struct Settled {
    status: TaskStatus,
    payload: Option<ContentPayload>,
}

/// Task lifecycle controller.
///
/// Cheap to clone; clones share the board, composer, result view and history.
#[derive(Clone)]
pub struct TaskController {
    backend: Arc<dyn ContentBackend>,
    surface: Arc<dyn RenderSurface>,
    config: ControllerConfig,
    history_limit: u32,
    board: Arc<Mutex<TaskBoard>>,
    composer: Arc<Mutex<Composer>>,
    result: Arc<Mutex<Option<ResultView>>>,
    pub(crate) history: Arc<Mutex<HistoryView>>,
    shutdown: CancellationToken,
}

impl TaskController {
    pub fn new(
        backend: Arc<dyn ContentBackend>,
        surface: Arc<dyn RenderSurface>,
        config: ControllerConfig,
    ) -> Self {
        let composer = Composer {
            input: String::new(),
            content_type: config.default_content_type,
        };
        Self {
            backend,
            surface,
            config,
            history_limit: DEFAULT_HISTORY_LIMIT,
            board: Arc::new(Mutex::new(TaskBoard::new())),
            composer: Arc::new(Mutex::new(composer)),
            result: Arc::new(Mutex::new(None)),
            history: Arc::new(Mutex::new(HistoryView::default())),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub(crate) fn backend(&self) -> &dyn ContentBackend {
        self.backend.as_ref()
    }

    pub(crate) fn surface(&self) -> &dyn RenderSurface {
        self.surface.as_ref()
    }

    pub(crate) fn history_limit(&self) -> u32 {
        self.history_limit
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Cancel every running lifecycle and simulator
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn set_input(&self, input: impl Into<String>) {
        lock(&self.composer).input = input.into();
    }

    pub fn input(&self) -> String {
        lock(&self.composer).input.clone()
    }

    pub fn set_content_type(&self, content_type: ContentType) {
        lock(&self.composer).content_type = content_type;
    }

    pub fn content_type(&self) -> ContentType {
        lock(&self.composer).content_type
    }

    /// Snapshot of the primary card
    pub fn current_task(&self) -> Option<Task> {
        lock(&self.board).current().cloned()
    }

    /// Result view currently open, if any
    pub fn result_view(&self) -> Option<ResultView> {
        lock(&self.result).clone()
    }

    /// Launch a generate-and-publish task.
    ///
    /// Validation happens synchronously; on success a running card at 0% is
    /// already on the surface when this returns.
    pub fn start_task(&self, req: StartTask) -> Result<TaskHandle> {
        let (raw_topic, from_composer) = match req.topic {
            Some(topic) => (topic, false),
            None => (self.input(), true),
        };
        let topic = raw_topic.trim().to_string();
        if topic.is_empty() {
            self.surface.show_toast(EMPTY_TOPIC_TOAST, ToastLevel::Info);
            return Err(ControllerError::EmptyTopic);
        }

        let content_type = req.content_type.unwrap_or_else(|| self.content_type());
        let is_retry = req.existing_id.is_some();
        let id = req.existing_id.unwrap_or_else(TaskId::generate);
        let cancel = self.shutdown.child_token();
        let task = Task::new(id.clone(), topic.clone(), content_type);

        let card = {
            let mut board = lock(&self.board);
            let (card, superseded) = board.replace(task.clone(), cancel.clone());
            if let Some(superseded) = superseded {
                if self.config.cancel_superseded {
                    superseded.cancel();
                }
            }
            self.surface.create_task_card(&task);
            card
        };

        if from_composer {
            lock(&self.composer).input.clear();
        }

        info!(
            task_id = %id,
            topic = %topic,
            content_type = %content_type,
            retry = is_retry,
            "task started"
        );

        let request = GenerateRequest {
            topic,
            content_type,
            task_id: is_retry.then(|| id.to_string()),
        };
        let controller = self.clone();
        let join =
            tokio::spawn(async move { controller.run_lifecycle(card, request, cancel).await });

        Ok(TaskHandle { id, join })
    }

    async fn run_lifecycle(
        self,
        card: CardRef,
        request: GenerateRequest,
        cancel: CancellationToken,
    ) -> Option<TaskStatus> {
        self.advance_card(&card, progress::STARTING);

        let simulator_cancel = cancel.child_token();
        let simulator = {
            let controller = self.clone();
            let card = card.clone();
            let simulator_cancel = simulator_cancel.clone();
            tokio::spawn(async move { controller.simulate(card, simulator_cancel).await })
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(task_id = %card.id, "task cancelled before response");
                simulator_cancel.cancel();
                return None;
            }
            response = self.backend.generate_and_publish(&request) => response,
        };

        let settled = self.settle(&card, response);
        simulator_cancel.cancel();
        if let Err(err) = simulator.await {
            warn!(task_id = %card.id, error = %err, "progress simulator ended abnormally");
        }

        if let Some(payload) = settled.payload {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(task_id = %card.id, "task cancelled before result view");
                    return Some(settled.status);
                }
                _ = tokio::time::sleep(self.config.result_delay()) => {}
            }
            self.show_result(ResultView::from_payload(payload, Local::now()));
        }

        Some(settled.status)
    }

    async fn simulate(self, card: CardRef, cancel: CancellationToken) {
        let delivered = progress::run_simulator(self.config.progress_step(), cancel, |milestone| {
            match self.advance_card(&card, milestone) {
                Advance::Closed => Tick::Stop,
                Advance::Applied | Advance::Ignored => Tick::Continue,
            }
        })
        .await;
        debug!(task_id = %card.id, delivered, "progress simulator stopped");
    }

    fn advance_card(&self, card: &CardRef, milestone: Milestone) -> Advance {
        let mut board = lock(&self.board);
        let outcome = board.advance(card, milestone.percent, milestone.message);
        if outcome == Advance::Applied {
            self.surface
                .update_progress(&card.id, milestone.percent, milestone.message);
        }
        outcome
    }

    /// Apply the terminal state once and surface it
    fn finish_card(
        &self,
        card: &CardRef,
        status: TaskStatus,
        message: &str,
        result: Option<ContentPayload>,
    ) {
        let mut board = lock(&self.board);
        if !board.finish(card, status, message, result) {
            debug!(task_id = %card.id, %status, "card superseded; terminal update dropped");
            return;
        }
        if status == TaskStatus::Succeeded {
            self.surface.update_progress(&card.id, 100, message);
        }
        self.surface.set_terminal_status(&card.id, status, message);
    }

    fn settle(
        &self,
        card: &CardRef,
        response: std::result::Result<GenerateOutcome, DashboardError>,
    ) -> Settled {
        match response {
            Ok(GenerateOutcome::Success(payload)) => {
                info!(task_id = %card.id, "content generated and published");
                self.finish_card(
                    card,
                    TaskStatus::Succeeded,
                    SUCCESS_CARD_MESSAGE,
                    Some(payload.clone()),
                );
                self.surface.show_toast(SUCCESS_TOAST, ToastLevel::Success);
                Settled {
                    status: TaskStatus::Succeeded,
                    payload: Some(payload),
                }
            }
            Ok(GenerateOutcome::PartialFailure { payload, reason }) => {
                warn!(task_id = %card.id, reason = %reason, "content generated but publish failed");
                self.finish_card(
                    card,
                    TaskStatus::Failed,
                    PARTIAL_CARD_MESSAGE,
                    Some(payload.clone()),
                );
                self.surface.show_toast(PARTIAL_TOAST, ToastLevel::Error);
                Settled {
                    status: TaskStatus::Failed,
                    payload: Some(payload),
                }
            }
            Ok(GenerateOutcome::Failure(detail)) => {
                let message = detail.message();
                warn!(task_id = %card.id, error = %message, "generation failed");
                self.finish_card(card, TaskStatus::Failed, &message, None);
                let toast = if detail.is_structured() {
                    STRUCTURED_FAILURE_TOAST.to_string()
                } else {
                    message
                };
                self.surface.show_toast(&toast, ToastLevel::Error);
                Settled {
                    status: TaskStatus::Failed,
                    payload: None,
                }
            }
            Err(err) => {
                let message = err.detail();
                warn!(
                    task_id = %card.id,
                    error = %message,
                    retryable = err.is_retryable(),
                    "generate request failed"
                );
                self.finish_card(card, TaskStatus::Failed, &message, None);
                self.surface
                    .show_toast(&format!("Request failed: {message}"), ToastLevel::Error);
                Settled {
                    status: TaskStatus::Failed,
                    payload: None,
                }
            }
        }
    }

    pub(crate) fn show_result(&self, view: ResultView) {
        let mut current = lock(&self.result);
        self.surface.open_result_view(&view);
        *current = Some(view);
    }

    /// Retry the primary card; only failed cards can be retried
    pub fn retry_from_card(&self, id: &TaskId) -> Result<TaskHandle> {
        let task = self
            .current_task()
            .filter(|task| &task.id == id)
            .ok_or_else(|| ControllerError::TaskNotFound(id.to_string()))?;
        if !task.status.allows_retry() {
            return Err(ControllerError::RetryUnavailable {
                id: id.to_string(),
                status: task.status,
            });
        }
        self.start_task(StartTask::retry(task.topic, Some(task.content_type), task.id))
    }

    /// Launch one task per selected topic, throttled, without awaiting any of them
    pub async fn batch_generate(&self, selection: &mut SelectionState) -> Vec<TaskHandle> {
        let topics = selection.selected_titles();
        if topics.is_empty() {
            return Vec::new();
        }

        let content_type = self.content_type();
        info!(count = topics.len(), content_type = %content_type, "batch generation started");
        self.surface.show_toast(
            &format!("Started batch generation of {} tasks", topics.len()),
            ToastLevel::Success,
        );

        let launches = topics
            .into_iter()
            .map(|topic| StartTask::topic(topic, Some(content_type)))
            .collect();
        let handles = self.launch_throttled(launches).await;
        selection.clear_selection();
        handles
    }

    /// Sequential launches with the batch throttle before each one
    pub(crate) async fn launch_throttled(&self, launches: Vec<StartTask>) -> Vec<TaskHandle> {
        let mut handles = Vec::with_capacity(launches.len());
        for launch in launches {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.config.batch_throttle()) => {}
            }
            match self.start_task(launch) {
                Ok(handle) => handles.push(handle),
                Err(err) => warn!(error = %err, "batch launch skipped"),
            }
        }
        handles
    }

    /// Re-submit the open result's content to the publisher
    pub async fn retry_publish(&self) -> Result<bool> {
        let view = self.result_view().ok_or(ControllerError::NoContent)?;
        if !view.can_retry_publish() {
            return Err(ControllerError::AlreadyPublished);
        }

        let request = RetryPublishRequest::from(view.payload());
        let ack = match self.backend.retry_publish(&request).await {
            Ok(ack) => ack,
            Err(err) => {
                self.surface
                    .show_toast(&format!("Publish failed: {}", err.detail()), ToastLevel::Error);
                return Err(err.into());
            }
        };

        if !ack.success {
            let reason = ack.message.as_deref().unwrap_or(UNKNOWN_ERROR);
            warn!(reason = %reason, "retry publish rejected");
            self.surface
                .show_toast(&format!("Publish failed: {reason}"), ToastLevel::Error);
            return Ok(false);
        }

        info!("retry publish succeeded");
        let mut published = view.clone();
        published.mark_published(Local::now());
        {
            let mut current = lock(&self.result);
            if current.as_ref() == Some(&view) {
                self.surface.open_result_view(&published);
                *current = Some(published);
            } else {
                debug!("result view changed while publishing; newer view kept");
            }
        }
        self.surface.show_toast("Published", ToastLevel::Success);
        Ok(true)
    }
}
