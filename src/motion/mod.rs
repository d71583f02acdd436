//! Time-driven horizontal motion.
//!
//! Position is a pure function of time: [`MotionTimeline`] maps an instant to a
//! progress in `[0, 1]` and a position in `[0, distance]`. [`MotionDriver`]
//! samples that function once per frame from a [`FrameClock`] and stops after
//! the frame at which progress first reaches `1.0`.

mod clock;

pub use clock::*;

use std::time::Duration;
use tokio::time::Instant;

/// Fraction of `duration` covered after `elapsed`, clamped to `[0, 1]`.
///
/// A zero duration is complete immediately.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTimeline {
    start: Instant,
    duration: Duration,
    distance: f64,
}

impl MotionTimeline {
    pub fn new(start: Instant, duration: Duration, distance: f64) -> Self {
        Self {
            start,
            duration,
            distance,
        }
    }

    /// Timeline that starts `delay` after `invoked_at`.
    pub fn delayed(invoked_at: Instant, delay: Duration, duration: Duration, distance: f64) -> Self {
        Self::new(invoked_at + delay, duration, distance)
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.start + self.duration
    }

    /// Zero before the start, one at and after the end.
    pub fn progress_at(&self, now: Instant) -> f64 {
        progress(now.saturating_duration_since(self.start), self.duration)
    }

    pub fn position_at(&self, now: Instant) -> f64 {
        self.progress_at(now) * self.distance
    }
}

/// One sample of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionFrame {
    pub at: Instant,
    pub progress: f64,
    pub position: f64,
}

impl MotionFrame {
    /// The frame that ends the motion.
    pub fn is_final(&self) -> bool {
        self.progress >= 1.0
    }
}

#[derive(Debug)]
pub struct MotionDriver<C> {
    clock: C,
    timeline: MotionTimeline,
    finished: bool,
}

impl<C: FrameClock> MotionDriver<C> {
    pub fn new(clock: C, timeline: MotionTimeline) -> Self {
        Self {
            clock,
            timeline,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Wait for the next frame and sample the timeline.
    ///
    /// A frame that would land after the end of the timeline is replaced by
    /// one at exactly the end, so motion stops on time for any frame period.
    ///
    /// Returns `None` once the final frame has been produced. Cancel safe: a
    /// dropped call consumes no frame.
    pub async fn next_frame(&mut self) -> Option<MotionFrame> {
        if self.finished {
            return None;
        }

        let end = self.timeline.end();
        let at = tokio::select! {
            biased;

            at = self.clock.next_frame() => at.min(end),
            _ = tokio::time::sleep_until(end) => end,
        };
        let frame = MotionFrame {
            at,
            progress: self.timeline.progress_at(at),
            position: self.timeline.position_at(at),
        };
        if frame.is_final() {
            self.finished = true;
        }
        Some(frame)
    }
}

/// Callback form of the driver: wait for the timeline start, call `on_tick`
/// with the progress of every frame, then `on_complete` exactly once.
pub async fn animate<C, T, D>(clock: C, timeline: MotionTimeline, mut on_tick: T, on_complete: D)
where
    C: FrameClock,
    T: FnMut(f64),
    D: FnOnce(),
{
    tokio::time::sleep_until(timeline.start()).await;

    let mut driver = MotionDriver::new(clock, timeline);
    while let Some(frame) = driver.next_frame().await {
        on_tick(frame.progress);
    }
    on_complete();
}
