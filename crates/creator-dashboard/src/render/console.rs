/*
[INPUT]:  Surface calls from the controller
[OUTPUT]: Styled lines on stdout
[POS]:    Presentation layer - terminal surface used by the binary
[UPDATE]: When card or result layout changes
*/

use console::style;

use super::{RenderSurface, ToastLevel};
use crate::result_view::ResultView;
use crate::task::{Task, TaskId, TaskStatus};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl ConsoleSurface {
    pub fn new() -> Self {
        Self
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

impl RenderSurface for ConsoleSurface {
    fn create_task_card(&self, task: &Task) {
        println!(
            "{} {} {}",
            style("▶").cyan(),
            style(&task.topic).bold(),
            style(format!("({} · {})", task.id, task.content_type)).dim()
        );
    }

    fn update_progress(&self, id: &TaskId, percent: u8, message: &str) {
        println!(
            "  {} {:>3}% {} {}",
            progress_bar(percent),
            percent,
            message,
            style(id).dim()
        );
    }

    fn set_terminal_status(&self, id: &TaskId, status: TaskStatus, message: &str) {
        match status {
            TaskStatus::Succeeded => {
                println!("  {} {}", style("✔ succeeded").green().bold(), message);
            }
            TaskStatus::Failed => {
                println!("  {} {}", style("✘ failed").red().bold(), message);
                println!(
                    "  {}",
                    style(format!("retry with: creator-dashboard generate --retry-id {id} <topic>"))
                        .dim()
                );
            }
            TaskStatus::Running => {
                println!("  {} {}", style("… running").yellow(), message);
            }
        }
    }

    fn show_toast(&self, message: &str, level: ToastLevel) {
        let badge = match level {
            ToastLevel::Info => style("ℹ").blue(),
            ToastLevel::Success => style("✔").green(),
            ToastLevel::Error => style("✘").red(),
        };
        println!("{badge} {message}");
    }

    fn open_result_view(&self, view: &ResultView) {
        println!("\n{}", style(&view.title).bold().underlined());
        println!("{}", style(&view.timestamp).dim());
        if !view.body.is_empty() {
            println!("\n{}", view.body);
        }
        if !view.tags.is_empty() {
            let tags: Vec<String> = view.tags.iter().map(|tag| format!("#{tag}")).collect();
            println!("\n{}", style(tags.join(" ")).cyan());
        }
        for image in &view.images {
            println!("{} {}", style("image:").dim(), image);
        }
        let state = if view.can_retry_publish() {
            style(view.publish_state.label().to_string()).red()
        } else {
            style(view.publish_state.label().to_string()).green()
        };
        println!("{} {}", style("publish:").dim(), state);
        if view.can_retry_publish() {
            println!(
                "{}",
                style("publish again with: creator-dashboard retry-publish <task-id>").dim()
            );
        }
        println!();
    }
}
