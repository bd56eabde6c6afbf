/*
[INPUT]:  Validation failures and backend adapter errors
[OUTPUT]: ControllerError returned by controller entry points
[POS]:    Error handling layer - controller-level errors
[UPDATE]: When adding new controller operations with new failure modes
*/

use creator_dashboard_adapter::DashboardError;
use thiserror::Error;

use crate::task::TaskStatus;

#[derive(Error, Debug)]
pub enum ControllerError {
    /// Topic missing or whitespace only; no task was created
    #[error("please enter a topic")]
    EmptyTopic,

    #[error("please enter a link")]
    EmptyUrl,

    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// Retry is only offered on failed cards
    #[error("task {id} cannot be retried while {status}")]
    RetryUnavailable { id: String, status: TaskStatus },

    #[error("no generated content to show")]
    NoContent,

    #[error("content is already published")]
    AlreadyPublished,

    #[error("model settings incomplete: {0} is missing")]
    IncompleteSettings(&'static str),

    #[error(transparent)]
    Backend(#[from] DashboardError),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
