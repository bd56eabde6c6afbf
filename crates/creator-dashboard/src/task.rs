/*
[INPUT]:  Task creation requests, progress ticks, terminal outcomes
[OUTPUT]: Task records and the board holding the current task card
[POS]:    Domain layer - task identity and the single live card
[UPDATE]: When task fields or card transition rules change
[UPDATE]: 2026-10-04 Key card updates by (id, generation) so same-id retries start clean
*/

use creator_dashboard_adapter::{ContentPayload, ContentType};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio_util::sync::CancellationToken;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identity shared between a live card and the backend's history record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// `task-<unix millis>-<9 base36 chars>`
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!(
            "task-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            suffix
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Running,
    Succeeded,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Running)
    }

    /// Failed cards offer a retry action; nothing else does
    pub fn allows_retry(self) -> bool {
        self == TaskStatus::Failed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Running => "running",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// One generate-and-publish cycle as tracked by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub topic: String,
    pub content_type: ContentType,
    pub status: TaskStatus,
    pub progress_percent: u8,
    pub progress_message: String,
    pub result: Option<ContentPayload>,
}

impl Task {
    pub fn new(id: TaskId, topic: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id,
            topic: topic.into(),
            content_type,
            status: TaskStatus::Running,
            progress_percent: 0,
            progress_message: "Ready".to_string(),
            result: None,
        }
    }
}

/// Handle on one rendering of a card.
///
/// A retry may re-create a card with the same id; the generation keeps the
/// older lifecycle from writing into the newer card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRef {
    pub id: TaskId,
    pub generation: u64,
}

/// Effect of a progress tick on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Applied,
    /// Percent would not increase; the card is unchanged
    Ignored,
    /// Card is terminal or superseded; the caller should stop ticking
    Closed,
}

#[derive(Debug)]
struct LiveCard {
    generation: u64,
    task: Task,
    cancel: CancellationToken,
}

/// The primary surface's single current card
#[derive(Debug, Default)]
pub struct TaskBoard {
    current: Option<LiveCard>,
    next_generation: u64,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh card, returning the superseded card's cancellation token
    pub fn replace(
        &mut self,
        task: Task,
        cancel: CancellationToken,
    ) -> (CardRef, Option<CancellationToken>) {
        self.next_generation += 1;
        let card = CardRef {
            id: task.id.clone(),
            generation: self.next_generation,
        };
        let previous = self.current.replace(LiveCard {
            generation: card.generation,
            task,
            cancel,
        });
        (card, previous.map(|live| live.cancel))
    }

    pub fn current(&self) -> Option<&Task> {
        self.current.as_ref().map(|live| &live.task)
    }

    fn live_mut(&mut self, card: &CardRef) -> Option<&mut LiveCard> {
        self.current
            .as_mut()
            .filter(|live| live.generation == card.generation && live.task.id == card.id)
    }

    pub fn is_live(&self, card: &CardRef) -> bool {
        self.current
            .as_ref()
            .is_some_and(|live| live.generation == card.generation && live.task.id == card.id)
    }

    /// Move a running card forward; never lowers the percent
    pub fn advance(&mut self, card: &CardRef, percent: u8, message: &str) -> Advance {
        let Some(live) = self.live_mut(card) else {
            return Advance::Closed;
        };
        if live.task.status.is_terminal() {
            return Advance::Closed;
        }
        let percent = percent.min(100);
        if percent < live.task.progress_percent {
            return Advance::Ignored;
        }
        live.task.progress_percent = percent;
        live.task.progress_message = message.to_string();
        Advance::Applied
    }

    /// Set the terminal status once; later calls are rejected
    pub fn finish(
        &mut self,
        card: &CardRef,
        status: TaskStatus,
        message: &str,
        result: Option<ContentPayload>,
    ) -> bool {
        debug_assert!(status.is_terminal());
        let Some(live) = self.live_mut(card) else {
            return false;
        };
        if live.task.status.is_terminal() {
            return false;
        }
        live.task.status = status;
        live.task.progress_message = message.to_string();
        if status == TaskStatus::Succeeded {
            live.task.progress_percent = 100;
        }
        live.task.result = result;
        true
    }
}
