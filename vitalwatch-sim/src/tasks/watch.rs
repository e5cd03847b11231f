//! Watch face task
//!
//! Logs the watch face whenever the controller publishes a new one.

use tracing::{debug, info};

use crate::channels::WATCH_UPDATE;

/// Watch task - renders published faces to the log
pub async fn watch_task() {
    info!("Watch task started");

    loop {
        let frame = WATCH_UPDATE.wait().await;
        info!(target: "vitalwatch::watch", "{}", frame);
        debug!(
            target: "vitalwatch::watch",
            stroke = frame.stroke.hex(),
            "ECG {}",
            frame.sparkline
        );
    }
}
