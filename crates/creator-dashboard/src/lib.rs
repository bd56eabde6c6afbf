/*
[INPUT]:  Public API exports for the creator-dashboard crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod backend;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod error;
pub mod history;
pub mod progress;
pub mod render;
pub mod result_view;
pub mod selection;
pub mod settings;
pub mod task;

// Re-export main types for convenience
pub use backend::ContentBackend;
pub use config::{ControllerConfig, DashboardConfig};
pub use controller::{StartTask, TaskController, TaskHandle};
pub use error::ControllerError;
pub use history::{HistoryFilter, HistoryGroup, HistoryView};
pub use render::{ConsoleSurface, RecordingSurface, RenderSurface, SurfaceEvent, ToastLevel};
pub use result_view::{PublishState, ResultView};
pub use selection::SelectionState;
pub use task::{Task, TaskId, TaskStatus};
