//! Scenario kinds and the record of a live run

use core::fmt;

use crate::config::{ScenarioConfig, ScenarioProfile};
use crate::state::ScenarioPhase;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Scripted scenario kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum ScenarioKind {
    /// Elevated heart rate (alert tier)
    Monitor,
    /// Tachycardia (critical tier)
    Hazard,
}

impl ScenarioKind {
    /// Label used in the forced alert message
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Monitor => "Monitor",
            ScenarioKind::Hazard => "Hazard",
        }
    }

    /// Tuning for this kind
    pub fn profile<'a>(&self, config: &'a ScenarioConfig) -> &'a ScenarioProfile {
        match self {
            ScenarioKind::Monitor => &config.monitor,
            ScenarioKind::Hazard => &config.hazard,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::Monitor => f.write_str("MONITOR"),
            ScenarioKind::Hazard => f.write_str("HAZARD"),
        }
    }
}

/// A live scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRun {
    pub kind: ScenarioKind,
    /// Target heart rate (BPM)
    pub target_bpm: u16,
    /// Ramp step per nominal tick, fixed at arm time
    pub ramp_speed: f32,
    /// Engine time the scenario was armed (ms)
    pub started_at_ms: u64,
    pub phase: ScenarioPhase,
    /// Engine time of arrival, once reached (ms)
    pub arrived_at_ms: Option<u64>,
}
