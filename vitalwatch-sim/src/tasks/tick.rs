//! Tick task for time-based updates
//!
//! Signals the controller once per frame with the engine time. The engine
//! decides which of its cadences are due.

use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::info;

use crate::channels::TICK_SIGNAL;

/// Milliseconds since `start`
pub fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Tick task - sends periodic tick signals with timestamp
pub async fn tick_task(start: Instant, frame_ms: u32) {
    info!(frame_ms, "Tick task started");

    let mut ticker = time::interval(Duration::from_millis(frame_ms.max(1) as u64));
    // A late frame is rescaled by the ramp; bursts would only repeat work
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        TICK_SIGNAL.signal(elapsed_ms(start));
    }
}
