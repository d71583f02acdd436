#![allow(dead_code)]

use std::time::Duration;

use status_square::config::AnimationConfig;
use status_square::fetch::Fetcher;
use status_square::models::{FetchError, FetchOutcome};
use status_square::surface::{Shape, Surface};

/// How a [`ScriptedFetcher`] settles.
#[derive(Debug, Clone)]
pub enum Script {
    Body(&'static str),
    Status(u16, &'static str),
    Unreachable,
    Never,
}

/// Fetcher that settles a fixed time after it is started, with no I/O.
pub struct ScriptedFetcher {
    settle_after: Duration,
    script: Script,
}

impl ScriptedFetcher {
    pub fn new(settle_after_ms: u64, script: Script) -> Self {
        Self {
            settle_after: Duration::from_millis(settle_after_ms),
            script,
        }
    }

    pub fn never() -> Self {
        Self::new(0, Script::Never)
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, _url: &str) -> FetchOutcome {
        tokio::time::sleep(self.settle_after).await;
        match self.script.clone() {
            Script::Body(body) => FetchOutcome::Completed(body.to_string()),
            Script::Status(status, body) => FetchOutcome::Failed(FetchError::Status {
                status,
                body: body.to_string(),
            }),
            Script::Unreachable => {
                FetchOutcome::Failed(FetchError::Unreachable("connection refused".to_string()))
            }
            Script::Never => std::future::pending().await,
        }
    }
}

/// Reference timing with a frame interval that divides the duration evenly,
/// so every frame offset is a round number.
pub fn test_config() -> AnimationConfig {
    AnimationConfig {
        frame_interval_ms: 10,
        ..Default::default()
    }
}

/// The only visible shape on the surface.
pub fn only_shape(surface: &Surface) -> Shape {
    let shapes: Vec<_> = surface.visible_shapes().collect();
    assert_eq!(shapes.len(), 1, "expected exactly one visible shape");
    shapes[0].clone()
}
