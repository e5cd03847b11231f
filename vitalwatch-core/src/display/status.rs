//! Watch status line and displayed heart rate

use core::fmt::Write;

use heapless::String;
use rand::Rng;

use crate::severity::{Assessment, HeartRateLabel, Status};

/// Maximum status line length (bytes)
pub const MAX_STATUS_LEN: usize = 32;

/// Bounded status line
pub type StatusText = String<MAX_STATUS_LEN>;

/// Status line for the watch face
///
/// - critical: `"CRITICAL: TACHYCARDIA"`, or `"CRITICAL: OXYGEN"` when only
///   saturation is critical
/// - alert: `"ALERT: ELEVATED HR"`, or `"ALERT: OXYGEN"`
/// - otherwise: `"NORMAL • SECURE"`
pub fn watch_status(assessment: &Assessment) -> StatusText {
    let hr = &assessment.heart_rate;
    let mut text = StatusText::new();

    let _ = if assessment.is_critical() {
        let cause = if hr.status == Status::Critical {
            hr.label.as_str()
        } else {
            "OXYGEN"
        };
        write!(text, "{}: {}", Status::Critical, cause)
    } else if assessment.is_alert() {
        let cause = if hr.status == Status::Alert {
            hr.label.as_str()
        } else {
            "OXYGEN"
        };
        write!(text, "{}: {}", Status::Alert, cause)
    } else {
        write!(text, "{} • SECURE", HeartRateLabel::Normal)
    };

    text
}

/// Heart rate shown on the watch face
///
/// Adds a uniform nudge from `[-magnitude, magnitude)` so the number looks
/// alive. The snapshot is never touched.
pub fn jittered_bpm<R: Rng + ?Sized>(bpm: f32, magnitude: f32, rng: &mut R) -> f32 {
    if magnitude > 0.0 && magnitude.is_finite() {
        bpm + rng.gen_range(-magnitude..magnitude)
    } else {
        bpm
    }
}
