//! Events that drive scenario phase transitions

/// Events that can trigger a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioEvent {
    // Commands
    /// Operator armed a scenario
    Arm,
    /// Operator stopped the scenario, or an auto-stop fired
    Stop,

    // Driver events
    /// Target written and ramp speed engaged
    RampStarted,
    /// Arrival poll found the heart rate within tolerance of the target
    TargetReached,
    /// Hold time after arrival elapsed
    AutoStopDue,
}
