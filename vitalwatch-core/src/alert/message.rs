//! Alert message text

use core::fmt::Write;

use heapless::String;

use crate::scenario::ScenarioKind;
use crate::severity::Status;

/// Maximum alert message length (bytes)
pub const MAX_MESSAGE_LEN: usize = 64;

/// Bounded alert message
pub type AlertMessage = String<MAX_MESSAGE_LEN>;

/// Message of a forced scenario alert, e.g. `"Hazard Event: BPM 172"`
pub fn scenario_message(kind: ScenarioKind, target_bpm: u16) -> AlertMessage {
    let mut msg = AlertMessage::new();
    let _ = write!(msg, "{} Event: BPM {}", kind.label(), target_bpm);
    msg
}

/// Message of an automatic alert, e.g. `"CRITICAL_BROADCAST | BPM: 160 | SpO2: 98%"`
pub fn broadcast_message(status: Status, bpm: i32, spo2: u8) -> AlertMessage {
    let mut msg = AlertMessage::new();
    let _ = write!(msg, "{}_BROADCAST | BPM: {} | SpO2: {}%", status, bpm, spo2);
    msg
}
