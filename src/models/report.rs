use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Color, OutcomeSummary};

/// Phase of the completion coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatorState {
    /// Nothing has been started yet.
    Idle,
    /// Motion is running; the fetch may or may not have settled.
    Waiting,
    /// Motion has stopped and the fetch is still outstanding.
    MotionDone,
    /// Both have finished and the color has been applied. Terminal.
    BothDone,
}

/// One entry in the run's timeline. Offsets are milliseconds since invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    Frame {
        at_ms: u64,
        progress: f64,
        position: f64,
    },
    MotionComplete {
        at_ms: u64,
        position: f64,
        color: Color,
    },
    FetchSettled {
        at_ms: u64,
        outcome: OutcomeSummary,
    },
    ColorApplied {
        at_ms: u64,
        color: Color,
    },
}

/// What a single invocation did, in order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub url: String,
    pub started_at: DateTime<Utc>,
    pub state: CoordinatorState,
    pub final_color: Option<Color>,
    pub frames: u32,
    pub motion_completed_ms: Option<u64>,
    pub fetch_settled_ms: Option<u64>,
    pub color_applied_ms: Option<u64>,
    pub events: Vec<TimelineEvent>,
}

impl RunReport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            started_at: Utc::now(),
            state: CoordinatorState::Idle,
            final_color: None,
            frames: 0,
            motion_completed_ms: None,
            fetch_settled_ms: None,
            color_applied_ms: None,
            events: Vec::new(),
        }
    }

    /// Number of `ColorApplied` events recorded.
    pub fn color_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TimelineEvent::ColorApplied { .. }))
            .count()
    }
}
