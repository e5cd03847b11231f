//! Configuration type definitions
//!
//! Every threshold, budget and cadence the engine uses is a named field
//! here. Nothing in the engine hard-codes these numbers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heart-rate tier boundaries (BPM)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct HeartRateThresholds {
    /// Readings below this are bradycardia (critical)
    pub bradycardia_below: f32,
    /// Lowest reading in the normal tier
    pub normal_min: f32,
    /// Highest reading in the normal tier
    pub normal_max: f32,
    /// Readings above this are tachycardia (critical)
    pub tachycardia_above: f32,
}

impl Default for HeartRateThresholds {
    fn default() -> Self {
        Self {
            bradycardia_below: 40.0,
            normal_min: 50.0,
            normal_max: 120.0,
            tachycardia_above: 150.0,
        }
    }
}

/// Oxygen saturation tier boundaries (%)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct OxygenThresholds {
    /// Saturation below this is critical
    pub critical_below: u8,
    /// Highest saturation still in the alert tier
    pub alert_max: u8,
}

impl Default for OxygenThresholds {
    fn default() -> Self {
        Self {
            critical_below: 90,
            alert_max: 94,
        }
    }
}

/// Automatic alert suppression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AlertConfig {
    /// Minimum gap between automatic alerts (ms)
    pub cooldown_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { cooldown_ms: 20_000 }
    }
}

/// Heart-rate ramp parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RampConfig {
    /// BPM moved per nominal tick when no scenario is running
    pub idle_step: f32,
    /// Nominal animation tick rate the step sizes are expressed in
    pub ticks_per_second: f32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            idle_step: 0.2,
            ticks_per_second: 60.0,
        }
    }
}

impl RampConfig {
    /// Duration of one nominal tick in milliseconds
    pub fn nominal_tick_ms(&self) -> f32 {
        if self.ticks_per_second > 0.0 {
            1000.0 / self.ticks_per_second
        } else {
            1000.0 / 60.0
        }
    }
}

/// Per-scenario tuning
///
/// A partial table is completed from the defaults of its own kind, never
/// from another kind's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScenarioProfile {
    /// Lowest target BPM (inclusive)
    pub target_min: u16,
    /// Highest target BPM (inclusive)
    pub target_max: u16,
    /// Ticks the ramp is budgeted to take from arm to arrival
    pub budget_ticks: u32,
    /// Delay from arrival to the automatic stop (ms)
    pub auto_stop_ms: u64,
}

impl ScenarioProfile {
    /// Defaults for the Monitor scenario (5 s ramp, 2 s hold)
    pub const fn monitor() -> Self {
        Self {
            target_min: 121,
            target_max: 150,
            budget_ticks: 300,
            auto_stop_ms: 2000,
        }
    }

    /// Defaults for the Hazard scenario (8 s ramp, 3 s hold)
    pub const fn hazard() -> Self {
        Self {
            target_min: 151,
            target_max: 195,
            budget_ticks: 480,
            auto_stop_ms: 3000,
        }
    }

    /// Fill unset fields from `base`
    #[cfg(feature = "serde")]
    fn overlay(partial: PartialProfile, base: Self) -> Self {
        Self {
            target_min: partial.target_min.unwrap_or(base.target_min),
            target_max: partial.target_max.unwrap_or(base.target_max),
            budget_ticks: partial.budget_ticks.unwrap_or(base.budget_ticks),
            auto_stop_ms: partial.auto_stop_ms.unwrap_or(base.auto_stop_ms),
        }
    }
}

/// Scenario table as written, before kind defaults are applied
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct PartialProfile {
    target_min: Option<u16>,
    target_max: Option<u16>,
    budget_ticks: Option<u32>,
    auto_stop_ms: Option<u64>,
}

#[cfg(feature = "serde")]
fn monitor_profile<'de, D: serde::Deserializer<'de>>(d: D) -> Result<ScenarioProfile, D::Error> {
    let partial = PartialProfile::deserialize(d)?;
    Ok(ScenarioProfile::overlay(partial, ScenarioProfile::monitor()))
}

#[cfg(feature = "serde")]
fn hazard_profile<'de, D: serde::Deserializer<'de>>(d: D) -> Result<ScenarioProfile, D::Error> {
    let partial = PartialProfile::deserialize(d)?;
    Ok(ScenarioProfile::overlay(partial, ScenarioProfile::hazard()))
}

/// Scripted scenario configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ScenarioConfig {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "monitor_profile"))]
    pub monitor: ScenarioProfile,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "hazard_profile"))]
    pub hazard: ScenarioProfile,
    /// Arrival is declared once |bpm - target| drops below this
    pub arrival_tolerance: f32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            monitor: ScenarioProfile::monitor(),
            hazard: ScenarioProfile::hazard(),
            arrival_tolerance: 1.0,
        }
    }
}

/// Periods of the engine's recurring tasks (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct CadenceConfig {
    /// Animation frame (ramp, evaluation, ECG scroll)
    pub frame_ms: u32,
    /// Scenario arrival and auto-stop poll
    pub scenario_poll_ms: u32,
    /// Displayed BPM jitter
    pub display_jitter_ms: u32,
    /// Ambient drift of temperature, blood pressure and respiration
    pub ambient_jitter_ms: u32,
    /// Watch-face clock
    pub clock_ms: u32,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            scenario_poll_ms: 100,
            display_jitter_ms: 500,
            ambient_jitter_ms: 2000,
            clock_ms: 1000,
        }
    }
}

/// Magnitudes of the random nudges applied to the snapshot and display
///
/// Each nudge is drawn uniformly from `[-magnitude, magnitude)`. Integer
/// fields are floored after drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct JitterConfig {
    pub temperature_c: f32,
    pub bp_sys: f32,
    pub bp_dia: f32,
    pub resp_rate: f32,
    /// Displayed BPM only, never written back
    pub display_bpm: f32,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            temperature_c: 0.1,
            bp_sys: 2.0,
            bp_dia: 1.5,
            resp_rate: 1.0,
            display_bpm: 1.5,
        }
    }
}

/// ECG trace rendering
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EcgConfig {
    /// Seconds of signal visible across the trace width
    pub seconds_on_screen: f32,
    /// Frames per second the scroll speed is expressed in
    pub target_fps: f32,
    /// Beat duration is computed from max(min_bpm, bpm)
    pub min_bpm: f32,
    /// Peak amplitude of the additive noise (px)
    pub noise_px: f32,
}

impl Default for EcgConfig {
    fn default() -> Self {
        Self {
            seconds_on_screen: 2.0,
            target_fps: 60.0,
            min_bpm: 20.0,
            noise_px: 1.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EngineConfig {
    pub heart_rate: HeartRateThresholds,
    pub oxygen: OxygenThresholds,
    pub alert: AlertConfig,
    pub ramp: RampConfig,
    pub scenario: ScenarioConfig,
    pub cadence: CadenceConfig,
    pub jitter: JitterConfig,
    pub ecg: EcgConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let hr = HeartRateThresholds::default();
        assert_eq!(hr.bradycardia_below, 40.0);
        assert_eq!(hr.normal_min, 50.0);
        assert_eq!(hr.normal_max, 120.0);
        assert_eq!(hr.tachycardia_above, 150.0);

        let ox = OxygenThresholds::default();
        assert_eq!(ox.critical_below, 90);
        assert_eq!(ox.alert_max, 94);
    }

    #[test]
    fn test_scenario_budgets() {
        let config = ScenarioConfig::default();
        assert_eq!(config.monitor.budget_ticks, 300);
        assert_eq!(config.hazard.budget_ticks, 480);
        assert_eq!(config.monitor.auto_stop_ms, 2000);
        assert_eq!(config.hazard.auto_stop_ms, 3000);
        assert!(config.monitor.target_max < config.hazard.target_min);
    }

    #[test]
    fn test_nominal_tick() {
        let ramp = RampConfig::default();
        assert!((ramp.nominal_tick_ms() - 16.666_666).abs() < 1e-3);

        let broken = RampConfig {
            ticks_per_second: 0.0,
            ..RampConfig::default()
        };
        assert!(broken.nominal_tick_ms().is_finite());
    }
}
