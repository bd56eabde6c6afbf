/*
[INPUT]:  Surface calls from the controller
[OUTPUT]: Ordered event log for assertions and headless runs
[POS]:    Presentation layer - in-memory surface
[UPDATE]: When RenderSurface gains methods
*/

use std::sync::{Mutex, PoisonError};

use super::{RenderSurface, ToastLevel};
use crate::result_view::ResultView;
use crate::task::{Task, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    CardCreated {
        id: TaskId,
        topic: String,
        percent: u8,
    },
    Progress {
        id: TaskId,
        percent: u8,
        message: String,
    },
    Terminal {
        id: TaskId,
        status: TaskStatus,
        message: String,
        retry_available: bool,
    },
    Toast {
        message: String,
        level: ToastLevel,
    },
    ResultOpened(ResultView),
}

/// Surface that only records what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn cards_created(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::CardCreated { .. }))
            .count()
    }

    pub fn toasts(&self) -> Vec<(String, ToastLevel)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Toast { message, level } => Some((message, level)),
                _ => None,
            })
            .collect()
    }

    /// Percent values drawn for `id`, in order
    pub fn progress_for(&self, id: &TaskId) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Progress { id: event_id, percent, .. } if &event_id == id => {
                    Some(percent)
                }
                _ => None,
            })
            .collect()
    }

    pub fn terminal_for(&self, id: &TaskId) -> Vec<(TaskStatus, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Terminal {
                    id: event_id,
                    status,
                    message,
                    ..
                } if &event_id == id => Some((status, message)),
                _ => None,
            })
            .collect()
    }

    pub fn result_views(&self) -> Vec<ResultView> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::ResultOpened(view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn create_task_card(&self, task: &Task) {
        self.push(SurfaceEvent::CardCreated {
            id: task.id.clone(),
            topic: task.topic.clone(),
            percent: task.progress_percent,
        });
    }

    fn update_progress(&self, id: &TaskId, percent: u8, message: &str) {
        self.push(SurfaceEvent::Progress {
            id: id.clone(),
            percent,
            message: message.to_string(),
        });
    }

    fn set_terminal_status(&self, id: &TaskId, status: TaskStatus, message: &str) {
        self.push(SurfaceEvent::Terminal {
            id: id.clone(),
            status,
            message: message.to_string(),
            retry_available: status.allows_retry(),
        });
    }

    fn show_toast(&self, message: &str, level: ToastLevel) {
        self.push(SurfaceEvent::Toast {
            message: message.to_string(),
            level,
        });
    }

    fn open_result_view(&self, view: &ResultView) {
        self.push(SurfaceEvent::ResultOpened(view.clone()));
    }
}
