//! Scenario phase machine
//!
//! A scripted scenario moves IDLE → ARMED → RUNNING → ARRIVED → COOLDOWN
//! and back to IDLE. Stop returns to IDLE from anywhere.

use core::fmt;

use super::events::ScenarioEvent;

/// Scenario phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioPhase {
    /// No scenario alive
    #[default]
    Idle,
    /// Target chosen, ramp not yet engaged
    Armed,
    /// Ramping toward the target, polled for arrival
    Running,
    /// Target reached and alert forced, waiting for auto-stop
    Arrived,
    /// Auto-stop fired, teardown in progress
    Cooldown,
}

impl ScenarioPhase {
    /// Check if a scenario is alive in this phase
    pub fn is_active(&self) -> bool {
        !matches!(self, ScenarioPhase::Idle)
    }

    /// Check if the arrival poll applies in this phase
    pub fn awaits_arrival(&self) -> bool {
        matches!(self, ScenarioPhase::Running)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: ScenarioEvent) -> Self {
        use ScenarioEvent::*;
        use ScenarioPhase::*;

        match (self, event) {
            // Stop wins from any phase
            (_, Stop) => Idle,

            (Idle, Arm) => Armed,
            (Armed, RampStarted) => Running,
            (Running, TargetReached) => Arrived,
            (Arrived, AutoStopDue) => Cooldown,

            // Re-arming an alive scenario is resolved by the driver
            (phase, _) => phase,
        }
    }
}

impl fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioPhase::Idle => "IDLE",
            ScenarioPhase::Armed => "ARMED",
            ScenarioPhase::Running => "RUNNING",
            ScenarioPhase::Arrived => "ARRIVED",
            ScenarioPhase::Cooldown => "COOLDOWN",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut phase = ScenarioPhase::Idle;
        phase = phase.transition(ScenarioEvent::Arm);
        assert_eq!(phase, ScenarioPhase::Armed);
        phase = phase.transition(ScenarioEvent::RampStarted);
        assert_eq!(phase, ScenarioPhase::Running);
        assert!(phase.awaits_arrival());
        phase = phase.transition(ScenarioEvent::TargetReached);
        assert_eq!(phase, ScenarioPhase::Arrived);
        phase = phase.transition(ScenarioEvent::AutoStopDue);
        assert_eq!(phase, ScenarioPhase::Cooldown);
        phase = phase.transition(ScenarioEvent::Stop);
        assert_eq!(phase, ScenarioPhase::Idle);
    }

    #[test]
    fn test_stop_from_anywhere() {
        for phase in [
            ScenarioPhase::Idle,
            ScenarioPhase::Armed,
            ScenarioPhase::Running,
            ScenarioPhase::Arrived,
            ScenarioPhase::Cooldown,
        ] {
            assert_eq!(phase.transition(ScenarioEvent::Stop), ScenarioPhase::Idle);
        }
    }

    #[test]
    fn test_out_of_order_events_ignored() {
        assert_eq!(
            ScenarioPhase::Idle.transition(ScenarioEvent::TargetReached),
            ScenarioPhase::Idle
        );
        assert_eq!(
            ScenarioPhase::Running.transition(ScenarioEvent::AutoStopDue),
            ScenarioPhase::Running
        );
        assert_eq!(
            ScenarioPhase::Arrived.transition(ScenarioEvent::Arm),
            ScenarioPhase::Arrived
        );
    }
}
