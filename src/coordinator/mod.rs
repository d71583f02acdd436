//! Runs one invocation: insert the shape, wait, then drive motion and the fetch
//! side by side and apply the color once both are done.
//!
//! Everything happens on the calling task. Motion frames and the fetch are two
//! branches of one `select!` loop, so there is no parallel mutation and no
//! locking; ordering comes entirely from [`CompletionGate`].
//!
//! If the fetch never settles, [`Coordinator::run`] never returns. The shape is
//! left at rest in its initial color.

mod gate;

pub use gate::*;

use tokio::time::Instant;

use crate::config::AnimationConfig;
use crate::fetch::Fetcher;
use crate::models::{Color, RunReport, TimelineEvent};
use crate::motion::{FrameClock, IntervalClock, MotionDriver, MotionTimeline};
use crate::surface::{ShapeHandle, Surface};

pub struct Coordinator<F, C = IntervalClock> {
    config: AnimationConfig,
    fetcher: F,
    clock: C,
}

impl<F: Fetcher> Coordinator<F, IntervalClock> {
    /// Coordinator that samples motion on a fixed-period interval.
    pub fn new(config: AnimationConfig, fetcher: F) -> Self {
        let clock = IntervalClock::new(config.frame_interval());
        Self::with_clock(config, fetcher, clock)
    }
}

impl<F: Fetcher, C: FrameClock> Coordinator<F, C> {
    pub fn with_clock(config: AnimationConfig, fetcher: F, clock: C) -> Self {
        Self {
            config,
            fetcher,
            clock,
        }
    }

    /// Animate a new shape on `surface` and color it by the result of `url`.
    ///
    /// Consumes the coordinator: each one runs exactly once.
    pub async fn run(self, surface: &mut Surface, url: &str) -> RunReport {
        let Self {
            config,
            fetcher,
            clock,
        } = self;

        let invoked_at = Instant::now();
        let mut report = RunReport::new(url);

        if !surface.is_empty() {
            tracing::warn!("surface already has visible elements");
        }
        let handle = surface.create(config.size, config.initial_color);
        surface.insert_into_surface(handle);

        let mut gate = CompletionGate::new(config.palette);
        gate.begin();
        report.state = gate.state();
        tracing::info!(%handle, url, "shape inserted, starting in {:?}", config.delay());

        let timeline =
            MotionTimeline::delayed(invoked_at, config.delay(), config.duration(), config.distance);
        tokio::time::sleep_until(timeline.start()).await;

        let mut motion = MotionDriver::new(clock, timeline);
        let fetch = fetcher.fetch(url);
        tokio::pin!(fetch);
        tracing::info!("motion and fetch started");

        while !gate.is_done() {
            tokio::select! {
                biased;

                Some(frame) = motion.next_frame(), if !motion.is_finished() => {
                    surface.set_position(handle, frame.position);
                    let at_ms = offset_ms(invoked_at, frame.at);
                    report.frames += 1;
                    report.events.push(TimelineEvent::Frame {
                        at_ms,
                        progress: frame.progress,
                        position: frame.position,
                    });
                    tracing::debug!(at_ms, progress = frame.progress, position = frame.position, "frame");

                    if frame.is_final() {
                        let color = surface
                            .shape(handle)
                            .map(|s| s.color)
                            .unwrap_or(config.initial_color);
                        report.motion_completed_ms = Some(at_ms);
                        report.events.push(TimelineEvent::MotionComplete {
                            at_ms,
                            position: frame.position,
                            color,
                        });
                        tracing::info!(at_ms, "motion complete");

                        if let Some(color) = gate.motion_finished() {
                            apply_color(surface, handle, color, at_ms, &mut report);
                        }
                    }
                }
                outcome = &mut fetch, if !gate.fetch_settled_yet() => {
                    let at_ms = offset_ms(invoked_at, Instant::now());
                    report.fetch_settled_ms = Some(at_ms);
                    report.events.push(TimelineEvent::FetchSettled {
                        at_ms,
                        outcome: outcome.summary(),
                    });
                    tracing::info!(at_ms, value = ?outcome.value(), "fetch settled");

                    if let Some(color) = gate.fetch_settled(outcome) {
                        apply_color(surface, handle, color, at_ms, &mut report);
                    }
                }
                else => break,
            }
            report.state = gate.state();
        }

        report.state = gate.state();
        report
    }
}

fn apply_color(
    surface: &mut Surface,
    handle: ShapeHandle,
    color: Color,
    at_ms: u64,
    report: &mut RunReport,
) {
    surface.set_color(handle, color);
    report.final_color = Some(color);
    report.color_applied_ms = Some(at_ms);
    report.events.push(TimelineEvent::ColorApplied { at_ms, color });
    tracing::info!(at_ms, %color, "color applied");
}

fn offset_ms(origin: Instant, at: Instant) -> u64 {
    at.saturating_duration_since(origin).as_millis() as u64
}
