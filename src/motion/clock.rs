use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Source of frame opportunities.
///
/// Each call suspends until the next point at which a frame may be drawn and
/// resolves to the timestamp of that frame.
pub trait FrameClock {
    fn next_frame(&mut self) -> impl Future<Output = Instant>;
}

/// Frame clock backed by a fixed-period [`tokio::time::interval`].
///
/// The interval is created on the first request, so the first frame lands on
/// the instant motion starts rather than when the clock was built. Frames that
/// are missed because the loop was busy are skipped, not replayed.
#[derive(Debug)]
pub struct IntervalClock {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }
}

impl FrameClock for IntervalClock {
    async fn next_frame(&mut self) -> Instant {
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        interval.tick().await
    }
}
