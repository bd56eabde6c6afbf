/*
[INPUT]:  Step delay, cancellation token, per-tick callback
[OUTPUT]: Fixed sequence of illustrative progress milestones
[POS]:    Execution layer - optimistic progress while a request is in flight
[UPDATE]: When milestone copy or stop conditions change
*/

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One simulated step. The percentages are illustrative; they do not reflect
/// backend progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub percent: u8,
    pub message: &'static str,
}

pub const STARTING: Milestone = Milestone {
    percent: 10,
    message: "Starting the creation engine...",
};

pub const MILESTONES: [Milestone; 4] = [
    Milestone {
        percent: 30,
        message: "Searching sources across the web...",
    },
    Milestone {
        percent: 50,
        message: "AI is reading and analysing...",
    },
    Milestone {
        percent: 70,
        message: "Writing and polishing copy...",
    },
    Milestone {
        percent: 90,
        message: "Generating images and publishing...",
    },
];

/// What the tick callback wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Stop,
}

/// Walk the milestones, one per `step`.
///
/// Stops early when `tick` returns [`Tick::Stop`] or `cancel` fires. Returns
/// the number of milestones delivered.
pub async fn run_simulator<F>(step: Duration, cancel: CancellationToken, mut tick: F) -> usize
where
    F: FnMut(Milestone) -> Tick + Send,
{
    let mut delivered = 0;
    for milestone in MILESTONES {
        tokio::select! {
            _ = cancel.cancelled() => return delivered,
            _ = tokio::time::sleep(step) => {}
        }
        delivered += 1;
        if tick(milestone) == Tick::Stop {
            break;
        }
    }
    delivered
}
