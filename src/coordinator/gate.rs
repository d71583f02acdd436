use crate::models::{Color, CoordinatorState, FetchOutcome, Palette};

/// Joins motion completion and fetch settlement into a single color decision.
///
/// Both completion paths call into the same check; it yields a color exactly
/// once, and only when motion has finished and the outcome is known.
#[derive(Debug)]
pub struct CompletionGate {
    palette: Palette,
    state: CoordinatorState,
    motion_complete: bool,
    outcome: Option<FetchOutcome>,
}

impl CompletionGate {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            state: CoordinatorState::Idle,
            motion_complete: false,
            outcome: None,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == CoordinatorState::BothDone
    }

    pub fn fetch_settled_yet(&self) -> bool {
        self.outcome.is_some()
    }

    /// Shape is on the surface; motion and fetch are about to run.
    pub fn begin(&mut self) {
        if self.state == CoordinatorState::Idle {
            self.state = CoordinatorState::Waiting;
        }
    }

    pub fn motion_finished(&mut self) -> Option<Color> {
        if self.motion_complete {
            return None;
        }
        self.motion_complete = true;
        if self.state == CoordinatorState::Waiting && self.outcome.is_none() {
            self.state = CoordinatorState::MotionDone;
        }
        self.check()
    }

    /// Record the outcome. Later outcomes are ignored.
    pub fn fetch_settled(&mut self, outcome: FetchOutcome) -> Option<Color> {
        if self.outcome.is_some() {
            tracing::warn!("fetch settled more than once, ignoring later outcome");
            return None;
        }
        self.outcome = Some(outcome);
        self.check()
    }

    fn check(&mut self) -> Option<Color> {
        if self.state == CoordinatorState::BothDone || !self.motion_complete {
            return None;
        }
        let outcome = self.outcome.as_ref()?;
        self.state = CoordinatorState::BothDone;
        Some(self.palette.classify(outcome))
    }
}
