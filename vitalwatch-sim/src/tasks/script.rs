//! Scripted scenario start
//!
//! Arms a scenario after a delay, as if the operator had pressed the
//! button.

use tokio::time::{sleep, Duration};
use tracing::info;

use vitalwatch_core::scenario::ScenarioKind;

use crate::channels::COMMAND_CHANNEL;
use crate::command::ControlCommand;

/// Script task - arms `kind` once `delay` has passed
pub async fn script_task(kind: ScenarioKind, delay: Duration) {
    info!(%kind, delay_ms = delay.as_millis() as u64, "Scenario scheduled");
    sleep(delay).await;
    COMMAND_CHANNEL.send(ControlCommand::Arm(kind)).await;
}
