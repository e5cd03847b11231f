//! Alert dispatcher
//!
//! Automatic alerts fire only outside a scenario, only for a real
//! emergency (HIGH heart-rate severity or CRITICAL oxygen), only while
//! unlatched, and only after the cooldown since the previous dispatch.
//! Scenario arrivals force a dispatch that skips all of those checks.
//! Every dispatch latches and restarts the cooldown.

use core::fmt;

use super::{broadcast_message, scenario_message, AlertMessage};
use crate::config::AlertConfig;
use crate::scenario::ScenarioKind;
use crate::severity::{Assessment, Severity, Status};
use crate::vitals::VitalsSnapshot;

/// Latch and cooldown bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmergencyState {
    /// Set by every dispatch, cleared by recovery or scenario stop
    pub is_latched: bool,
    /// Engine time of the last dispatch (ms)
    pub last_alert_at_ms: Option<u64>,
}

impl EmergencyState {
    /// Check if strictly more than `cooldown_ms` passed since the last dispatch
    pub fn cooldown_elapsed(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        match self.last_alert_at_ms {
            None => true,
            Some(at) => now_ms.saturating_sub(at) > cooldown_ms,
        }
    }
}

/// Why an alert was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTrigger {
    /// Classifier found a real emergency
    Automatic,
    /// Scenario reached its target
    Scripted(ScenarioKind),
}

/// An alert ready for payload assembly
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRequest {
    pub trigger: AlertTrigger,
    pub message: AlertMessage,
    /// Snapshot at dispatch time
    pub snapshot: VitalsSnapshot,
    /// Classification at dispatch time
    pub assessment: Assessment,
    /// Engine time of dispatch (ms)
    pub issued_at_ms: u64,
}

impl AlertRequest {
    /// Payload status (heart-rate tier)
    pub fn status(&self) -> Status {
        self.assessment.heart_rate.status
    }

    /// Payload severity (heart-rate tier)
    pub fn severity(&self) -> Severity {
        self.assessment.heart_rate.severity
    }
}

/// System status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusDisplay {
    #[default]
    Baseline,
    Emergency { status: Status, bpm: i32 },
}

impl fmt::Display for StatusDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusDisplay::Baseline => f.write_str("Monitoring"),
            StatusDisplay::Emergency { status, bpm } => write!(f, "{}: {} BPM", status, bpm),
        }
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    /// Automatic alert emitted by this evaluation
    pub alert: Option<AlertRequest>,
    /// Latch cleared by this evaluation
    pub recovered: bool,
}

/// Alert dispatcher
#[derive(Debug, Clone)]
pub struct AlertDispatcher {
    cooldown_ms: u64,
    state: EmergencyState,
    display: StatusDisplay,
}

impl AlertDispatcher {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            cooldown_ms: config.cooldown_ms,
            state: EmergencyState::default(),
            display: StatusDisplay::Baseline,
        }
    }

    pub fn state(&self) -> EmergencyState {
        self.state
    }

    pub fn status_display(&self) -> StatusDisplay {
        self.display
    }

    /// Evaluate a classified snapshot
    ///
    /// Unchanged inputs never dispatch twice: once fired, the latch holds
    /// until the condition clears.
    pub fn evaluate(
        &mut self,
        snapshot: &VitalsSnapshot,
        assessment: &Assessment,
        scenario_active: bool,
        now_ms: u64,
    ) -> Evaluation {
        let mut out = Evaluation::default();
        let emergency = assessment.is_real_emergency();

        if scenario_active {
            return out;
        }

        if emergency
            && !self.state.is_latched
            && self.state.cooldown_elapsed(now_ms, self.cooldown_ms)
        {
            let message = broadcast_message(
                assessment.heart_rate.status,
                snapshot.rounded_bpm(),
                snapshot.spo2,
            );
            out.alert = Some(self.dispatch(
                AlertTrigger::Automatic,
                message,
                snapshot,
                assessment,
                now_ms,
            ));
        } else if !emergency && self.state.is_latched {
            self.clear_latch();
            out.recovered = true;
        }

        out
    }

    /// Dispatch a scenario arrival alert unconditionally
    pub fn force(
        &mut self,
        kind: ScenarioKind,
        target_bpm: u16,
        snapshot: &VitalsSnapshot,
        assessment: &Assessment,
        now_ms: u64,
    ) -> AlertRequest {
        let message = scenario_message(kind, target_bpm);
        self.dispatch(
            AlertTrigger::Scripted(kind),
            message,
            snapshot,
            assessment,
            now_ms,
        )
    }

    /// Clear the latch and return the status line to baseline
    ///
    /// The cooldown clock is kept.
    pub fn clear_latch(&mut self) {
        self.state.is_latched = false;
        self.display = StatusDisplay::Baseline;
    }

    fn dispatch(
        &mut self,
        trigger: AlertTrigger,
        message: AlertMessage,
        snapshot: &VitalsSnapshot,
        assessment: &Assessment,
        now_ms: u64,
    ) -> AlertRequest {
        self.state.is_latched = true;
        self.state.last_alert_at_ms = Some(now_ms);
        self.display = StatusDisplay::Emergency {
            status: assessment.heart_rate.status,
            bpm: snapshot.rounded_bpm(),
        };

        AlertRequest {
            trigger,
            message,
            snapshot: *snapshot,
            assessment: *assessment,
            issued_at_ms: now_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::SeverityClassifier;

    fn snapshot(bpm: f32, spo2: u8) -> (VitalsSnapshot, Assessment) {
        let mut s = VitalsSnapshot::resting();
        s.bpm = bpm;
        s.target_bpm = bpm;
        s.spo2 = spo2;
        let a = SeverityClassifier::default().assess(&s);
        (s, a)
    }

    fn dispatcher() -> AlertDispatcher {
        AlertDispatcher::new(&AlertConfig::default())
    }

    #[test]
    fn test_fires_once_within_cooldown() {
        let mut d = dispatcher();
        let (s, a) = snapshot(160.0, 98);

        let mut fired = 0;
        for now in (0..20_000).step_by(16) {
            if d.evaluate(&s, &a, false, now).alert.is_some() {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(d.state().is_latched);
    }

    #[test]
    fn test_latch_holds_past_cooldown() {
        let mut d = dispatcher();
        let (s, a) = snapshot(160.0, 98);
        assert!(d.evaluate(&s, &a, false, 0).alert.is_some());
        assert!(d.evaluate(&s, &a, false, 60_000).alert.is_none());
    }

    #[test]
    fn test_recovery_clears_latch() {
        let mut d = dispatcher();
        let (hot, hot_a) = snapshot(160.0, 98);
        let alert = d.evaluate(&hot, &hot_a, false, 0).alert.unwrap();
        assert_eq!(alert.message.as_str(), "CRITICAL_BROADCAST | BPM: 160 | SpO2: 98%");
        assert_eq!(alert.trigger, AlertTrigger::Automatic);
        assert_eq!(
            d.status_display(),
            StatusDisplay::Emergency {
                status: Status::Critical,
                bpm: 160
            }
        );

        let (calm, calm_a) = snapshot(90.0, 98);
        let eval = d.evaluate(&calm, &calm_a, false, 100);
        assert!(eval.recovered);
        assert!(eval.alert.is_none());
        assert!(!d.state().is_latched);
        assert_eq!(d.status_display(), StatusDisplay::Baseline);
    }

    #[test]
    fn test_cooldown_after_recovery() {
        let mut d = dispatcher();
        let (hot, hot_a) = snapshot(160.0, 98);
        let (calm, calm_a) = snapshot(90.0, 98);

        assert!(d.evaluate(&hot, &hot_a, false, 0).alert.is_some());
        assert!(d.evaluate(&calm, &calm_a, false, 1000).recovered);
        // Back in emergency but still cooling down
        assert!(d.evaluate(&hot, &hot_a, false, 20_000).alert.is_none());
        assert!(d.evaluate(&hot, &hot_a, false, 20_001).alert.is_some());
    }

    #[test]
    fn test_alert_tier_never_auto_fires() {
        let mut d = dispatcher();
        let (s, a) = snapshot(135.0, 92);
        assert!(d.evaluate(&s, &a, false, 0).alert.is_none());
    }

    #[test]
    fn test_oxygen_critical_fires() {
        let mut d = dispatcher();
        let (s, a) = snapshot(80.0, 88);
        let alert = d.evaluate(&s, &a, false, 0).alert.unwrap();
        // Payload status follows the heart-rate tier
        assert_eq!(alert.status(), Status::Normal);
        assert_eq!(alert.severity(), Severity::Low);
    }

    #[test]
    fn test_scenario_suppresses_auto_and_recovery() {
        let mut d = dispatcher();
        let (s, a) = snapshot(160.0, 98);
        assert!(d.evaluate(&s, &a, true, 0).alert.is_none());

        let forced = d.force(ScenarioKind::Hazard, 160, &s, &a, 0);
        assert_eq!(forced.message.as_str(), "Hazard Event: BPM 160");
        assert_eq!(forced.trigger, AlertTrigger::Scripted(ScenarioKind::Hazard));

        let (calm, calm_a) = snapshot(90.0, 98);
        assert!(!d.evaluate(&calm, &calm_a, true, 10).recovered);
        assert!(d.state().is_latched);
    }

    #[test]
    fn test_force_bypasses_latch_and_cooldown() {
        let mut d = dispatcher();
        let (s, a) = snapshot(160.0, 98);
        assert!(d.evaluate(&s, &a, false, 0).alert.is_some());
        let forced = d.force(ScenarioKind::Hazard, 170, &s, &a, 5);
        assert_eq!(forced.issued_at_ms, 5);
        assert_eq!(d.state().last_alert_at_ms, Some(5));
    }

    #[test]
    fn test_status_display_text() {
        let mut buf = heapless::String::<32>::new();
        core::fmt::write(&mut buf, format_args!("{}", StatusDisplay::Baseline)).unwrap();
        assert_eq!(buf.as_str(), "Monitoring");

        buf.clear();
        let emergency = StatusDisplay::Emergency {
            status: Status::Critical,
            bpm: 172,
        };
        core::fmt::write(&mut buf, format_args!("{}", emergency)).unwrap();
        assert_eq!(buf.as_str(), "CRITICAL: 172 BPM");
    }
}
