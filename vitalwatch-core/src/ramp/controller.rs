//! Ramp controller
//!
//! Step sizes are expressed per nominal tick (1/60 s by default). Frames
//! arriving at a different rate scale the step by elapsed / nominal so the
//! ramp keeps its wall-clock budget.

use libm::fabsf;

use crate::config::RampConfig;
use crate::vitals::VitalsSnapshot;

/// Move `current` toward `target` by at most `speed`
///
/// Snaps to the target instead of overshooting. A non-positive or
/// non-finite speed leaves `current` unchanged.
pub fn advance(current: f32, target: f32, speed: f32) -> f32 {
    if speed <= 0.0 || !speed.is_finite() {
        return current;
    }

    let distance = target - current;
    if fabsf(distance) <= speed {
        target
    } else if distance > 0.0 {
        current + speed
    } else {
        current - speed
    }
}

/// Speed that covers `current -> target` in exactly `budget_ticks` ticks
pub fn budget_speed(current: f32, target: f32, budget_ticks: u32) -> f32 {
    let distance = fabsf(target - current);
    if budget_ticks == 0 {
        distance
    } else {
        distance / budget_ticks as f32
    }
}

/// Current ramp mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RampMode {
    /// Default step, no scenario owns the ramp
    Idle,
    /// Scenario speed fixed when the scenario was armed
    Budgeted { speed: f32 },
}

/// Ramp controller for the snapshot's heart rate
#[derive(Debug, Clone)]
pub struct RampController {
    idle_step: f32,
    nominal_tick_ms: f32,
    mode: RampMode,
}

impl RampController {
    pub fn new(config: &RampConfig) -> Self {
        Self {
            idle_step: config.idle_step,
            nominal_tick_ms: config.nominal_tick_ms(),
            mode: RampMode::Idle,
        }
    }

    pub fn mode(&self) -> RampMode {
        self.mode
    }

    /// Step size per nominal tick in the current mode
    pub fn speed(&self) -> f32 {
        match self.mode {
            RampMode::Idle => self.idle_step,
            RampMode::Budgeted { speed } => speed,
        }
    }

    /// Switch to a scenario's budgeted speed
    pub fn engage(&mut self, speed: f32) {
        self.mode = RampMode::Budgeted { speed };
    }

    /// Fall back to the idle step
    pub fn release(&mut self) {
        self.mode = RampMode::Idle;
    }

    /// Advance the snapshot by one nominal tick
    ///
    /// Returns true if the heart rate changed.
    pub fn step(&self, snapshot: &mut VitalsSnapshot) -> bool {
        self.step_scaled(snapshot, 1.0)
    }

    /// Advance the snapshot by a frame of `elapsed_ms`
    ///
    /// Returns true if the heart rate changed.
    pub fn step_elapsed(&self, snapshot: &mut VitalsSnapshot, elapsed_ms: f32) -> bool {
        self.step_scaled(snapshot, elapsed_ms / self.nominal_tick_ms)
    }

    fn step_scaled(&self, snapshot: &mut VitalsSnapshot, scale: f32) -> bool {
        let before = snapshot.bpm;
        snapshot.bpm = advance(before, snapshot.target_bpm, self.speed() * scale);
        snapshot.bpm != before
    }
}
