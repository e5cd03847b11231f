//! Scenario driver
//!
//! Owns the single optional live run. The driver only decides phases and
//! writes `target_bpm`/`bpm` on the snapshot; the engine reacts to the
//! outcomes (ramp speed, stress derivation, forced alert, latch clear).

use core::fmt;

use libm::fabsf;
use rand::Rng;

use super::{ScenarioKind, ScenarioRun};
use crate::config::ScenarioConfig;
use crate::ramp::budget_speed;
use crate::state::{ScenarioEvent, ScenarioPhase};
use crate::vitals::{VitalsSnapshot, TARGET_BPM_LIMITS};

/// Rejected arm request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioError {
    /// Snapshot fails its field invariants
    InvalidSnapshot,
    /// Requested target lies outside the allowed heart-rate range
    TargetOutOfRange(u16),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::InvalidSnapshot => f.write_str("vitals snapshot is not valid"),
            ScenarioError::TargetOutOfRange(bpm) => {
                write!(f, "target {} BPM is outside the allowed range", bpm)
            }
        }
    }
}

/// Result of an accepted arm request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArmOutcome {
    /// New run started from idle
    Started(ScenarioRun),
    /// Same kind already alive; nothing changed
    AlreadyRunning(ScenarioRun),
    /// The other kind was stopped and a new run started
    Replaced {
        stopped: ScenarioKind,
        run: ScenarioRun,
    },
}

impl ArmOutcome {
    pub fn run(&self) -> &ScenarioRun {
        match self {
            ArmOutcome::Started(run)
            | ArmOutcome::AlreadyRunning(run)
            | ArmOutcome::Replaced { run, .. } => run,
        }
    }
}

/// Phase change reported by a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioAction {
    /// Heart rate snapped to the target; forced alert is due
    Arrived {
        kind: ScenarioKind,
        target_bpm: u16,
    },
    /// Hold time elapsed and the run was stopped
    AutoStopped { kind: ScenarioKind },
}

/// Drives at most one scenario at a time
#[derive(Debug, Clone)]
pub struct ScenarioDriver {
    config: ScenarioConfig,
    run: Option<ScenarioRun>,
}

impl ScenarioDriver {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, run: None }
    }

    /// The live run, if any
    pub fn current(&self) -> Option<&ScenarioRun> {
        self.run.as_ref()
    }

    pub fn phase(&self) -> ScenarioPhase {
        self.run.map(|r| r.phase).unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.phase().is_active()
    }

    /// Draw a uniform integer target from the kind's band
    pub fn choose_target<R: Rng + ?Sized>(&self, kind: ScenarioKind, rng: &mut R) -> u16 {
        let profile = kind.profile(&self.config);
        let (lo, hi) = if profile.target_min <= profile.target_max {
            (profile.target_min, profile.target_max)
        } else {
            (profile.target_max, profile.target_min)
        };
        rng.gen_range(lo..=hi)
    }

    /// Arm a scenario with a random target
    ///
    /// Arming the kind that is already alive is a no-op. Arming the other
    /// kind stops it first.
    pub fn arm<R: Rng + ?Sized>(
        &mut self,
        kind: ScenarioKind,
        snapshot: &mut VitalsSnapshot,
        now_ms: u64,
        rng: &mut R,
    ) -> Result<ArmOutcome, ScenarioError> {
        if !snapshot.is_valid() {
            return Err(ScenarioError::InvalidSnapshot);
        }
        if let Some(run) = self.run.filter(|r| r.kind == kind) {
            return Ok(ArmOutcome::AlreadyRunning(run));
        }
        let target = self.choose_target(kind, rng);
        self.arm_with_target(kind, target, snapshot, now_ms)
    }

    /// Arm a scenario with an explicit target
    pub fn arm_with_target(
        &mut self,
        kind: ScenarioKind,
        target_bpm: u16,
        snapshot: &mut VitalsSnapshot,
        now_ms: u64,
    ) -> Result<ArmOutcome, ScenarioError> {
        if !snapshot.is_valid() {
            return Err(ScenarioError::InvalidSnapshot);
        }
        if !TARGET_BPM_LIMITS.contains(target_bpm as f32) {
            return Err(ScenarioError::TargetOutOfRange(target_bpm));
        }
        if let Some(run) = self.run.filter(|r| r.kind == kind) {
            return Ok(ArmOutcome::AlreadyRunning(run));
        }

        let stopped = self.stop().map(|r| r.kind);

        let profile = kind.profile(&self.config);
        let mut run = ScenarioRun {
            kind,
            target_bpm,
            ramp_speed: budget_speed(snapshot.bpm, target_bpm as f32, profile.budget_ticks),
            started_at_ms: now_ms,
            phase: ScenarioPhase::Idle.transition(ScenarioEvent::Arm),
            arrived_at_ms: None,
        };

        snapshot.target_bpm = target_bpm as f32;
        run.phase = run.phase.transition(ScenarioEvent::RampStarted);
        self.run = Some(run);

        Ok(match stopped {
            Some(stopped) => ArmOutcome::Replaced { stopped, run },
            None => ArmOutcome::Started(run),
        })
    }

    /// Check arrival and auto-stop
    ///
    /// Call on the scenario poll cadence. On arrival the snapshot's heart
    /// rate is snapped to the target.
    pub fn poll(&mut self, snapshot: &mut VitalsSnapshot, now_ms: u64) -> Option<ScenarioAction> {
        let tolerance = self.config.arrival_tolerance;
        let run = self.run.as_mut()?;
        let kind = run.kind;

        if run.phase.awaits_arrival() {
            let target = run.target_bpm as f32;
            if fabsf(snapshot.bpm - target) >= tolerance {
                return None;
            }
            snapshot.bpm = target;
            run.phase = run.phase.transition(ScenarioEvent::TargetReached);
            run.arrived_at_ms = Some(now_ms);
            return Some(ScenarioAction::Arrived {
                kind,
                target_bpm: run.target_bpm,
            });
        }

        if run.phase != ScenarioPhase::Arrived {
            return None;
        }
        let arrived = run.arrived_at_ms.unwrap_or(now_ms);
        let hold = kind.profile(&self.config).auto_stop_ms;
        if now_ms.saturating_sub(arrived) < hold {
            return None;
        }
        run.phase = run.phase.transition(ScenarioEvent::AutoStopDue);
        self.stop();
        Some(ScenarioAction::AutoStopped { kind })
    }

    /// Stop the live run
    ///
    /// Leaves `bpm` and `target_bpm` where they are. Returns the stopped run,
    /// or None if nothing was alive.
    pub fn stop(&mut self) -> Option<ScenarioRun> {
        self.run.take().map(|mut run| {
            run.phase = run.phase.transition(ScenarioEvent::Stop);
            run
        })
    }
}
