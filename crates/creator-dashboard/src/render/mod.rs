/*
[INPUT]:  Task card mutations, toasts and result views from the controller
[OUTPUT]: RenderSurface trait plus console and recording implementations
[POS]:    Presentation boundary - everything the controller draws goes through here
[UPDATE]: When the controller needs a new kind of surface mutation
*/

mod console;
mod recording;

pub use console::ConsoleSurface;
pub use recording::{RecordingSurface, SurfaceEvent};

use crate::result_view::ResultView;
use crate::task::{Task, TaskId, TaskStatus};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
        };
        f.write_str(label)
    }
}

/// UI mutations consumed by the controller.
///
/// Calls arrive from tokio tasks while the board lock is held, so
/// implementations must not block and must not call back into the controller.
pub trait RenderSurface: Send + Sync {
    /// Replace the primary card with a fresh running card for `task`
    fn create_task_card(&self, task: &Task);

    fn update_progress(&self, id: &TaskId, percent: u8, message: &str);

    /// Show the final badge; failed cards also offer a retry action
    fn set_terminal_status(&self, id: &TaskId, status: TaskStatus, message: &str);

    fn show_toast(&self, message: &str, level: ToastLevel);

    fn open_result_view(&self, view: &ResultView);
}
