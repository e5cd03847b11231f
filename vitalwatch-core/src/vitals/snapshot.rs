//! Vitals snapshot
//!
//! The single mutable record every component reads. The engine is its only
//! writer; everything else receives copies.

use core::fmt;

use crate::config::Band;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Allowed range of the target heart rate (BPM)
pub const TARGET_BPM_LIMITS: Band<f32> = Band::new(20.0, 220.0);
/// Allowed range of oxygen saturation (%)
pub const SPO2_LIMITS: Band<u8> = Band::new(85, 100);
/// Allowed range of body temperature (°C)
pub const TEMPERATURE_LIMITS: Band<f32> = Band::new(36.0, 38.0);
/// Allowed range of systolic pressure (mmHg)
pub const BP_SYS_LIMITS: Band<u16> = Band::new(100, 180);
/// Allowed range of diastolic pressure (mmHg)
pub const BP_DIA_LIMITS: Band<u16> = Band::new(60, 110);
/// Allowed range of respiratory rate (breaths/min)
pub const RESP_RATE_LIMITS: Band<u8> = Band::new(12, 28);

/// Wearer activity reported alongside the vitals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Activity {
    #[default]
    Resting,
    Walking,
    Running,
    Sleeping,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Resting => "RESTING",
            Activity::Walking => "WALKING",
            Activity::Running => "RUNNING",
            Activity::Sleeping => "SLEEPING",
        }
    }

    /// Parse a case-insensitive activity name
    pub fn parse(name: &str) -> Option<Self> {
        [
            Activity::Resting,
            Activity::Walking,
            Activity::Running,
            Activity::Sleeping,
        ]
        .into_iter()
        .find(|a| a.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected manual input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// NaN or infinite reading
    NonFinite,
    /// A scripted scenario currently owns the target heart rate
    ScenarioActive,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonFinite => f.write_str("reading is not a finite number"),
            InputError::ScenarioActive => {
                f.write_str("target heart rate is locked while a scenario runs")
            }
        }
    }
}

/// Current physiological readings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VitalsSnapshot {
    /// Current heart rate, ramping toward `target_bpm`
    pub bpm: f32,
    /// Heart rate the ramp is heading for
    pub target_bpm: f32,
    /// Oxygen saturation (%)
    pub spo2: u8,
    /// Body temperature (°C)
    pub temperature_c: f32,
    /// Systolic pressure (mmHg)
    pub bp_sys: u16,
    /// Diastolic pressure (mmHg)
    pub bp_dia: u16,
    /// Breaths per minute
    pub resp_rate: u8,
    pub activity: Activity,
}

impl Default for VitalsSnapshot {
    fn default() -> Self {
        Self::resting()
    }
}

impl VitalsSnapshot {
    /// Resting baseline the simulator boots with
    pub const fn resting() -> Self {
        Self {
            bpm: 65.0,
            target_bpm: 65.0,
            spo2: 98,
            temperature_c: 36.8,
            bp_sys: 120,
            bp_dia: 80,
            resp_rate: 16,
            activity: Activity::Resting,
        }
    }

    /// Set the target heart rate, clamped to [`TARGET_BPM_LIMITS`]
    pub fn set_target_bpm(&mut self, bpm: f32) -> Result<(), InputError> {
        if !bpm.is_finite() {
            return Err(InputError::NonFinite);
        }
        self.target_bpm = TARGET_BPM_LIMITS.clamp(bpm);
        Ok(())
    }

    /// Set oxygen saturation, clamped to [`SPO2_LIMITS`]
    pub fn set_spo2(&mut self, spo2: u8) {
        self.spo2 = SPO2_LIMITS.clamp(spo2);
    }

    /// Heart rate rounded to the nearest whole beat
    pub fn rounded_bpm(&self) -> i32 {
        libm::roundf(self.bpm) as i32
    }

    /// Check every field against its allowed range
    pub fn is_valid(&self) -> bool {
        self.bpm.is_finite()
            && self.target_bpm.is_finite()
            && TARGET_BPM_LIMITS.contains(self.target_bpm)
            && SPO2_LIMITS.contains(self.spo2)
            && self.temperature_c.is_finite()
            && TEMPERATURE_LIMITS.contains(self.temperature_c)
            && BP_SYS_LIMITS.contains(self.bp_sys)
            && BP_DIA_LIMITS.contains(self.bp_dia)
            && RESP_RATE_LIMITS.contains(self.resp_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_baseline_is_valid() {
        let snapshot = VitalsSnapshot::resting();
        assert!(snapshot.is_valid());
        assert_eq!(snapshot.rounded_bpm(), 65);
        assert_eq!(snapshot.activity, Activity::Resting);
    }

    #[test]
    fn test_set_target_clamps() {
        let mut snapshot = VitalsSnapshot::resting();
        snapshot.set_target_bpm(500.0).unwrap();
        assert_eq!(snapshot.target_bpm, 220.0);
        snapshot.set_target_bpm(3.0).unwrap();
        assert_eq!(snapshot.target_bpm, 20.0);
        snapshot.set_target_bpm(88.5).unwrap();
        assert_eq!(snapshot.target_bpm, 88.5);
    }

    #[test]
    fn test_set_target_rejects_non_finite() {
        let mut snapshot = VitalsSnapshot::resting();
        assert_eq!(snapshot.set_target_bpm(f32::NAN), Err(InputError::NonFinite));
        assert_eq!(
            snapshot.set_target_bpm(f32::INFINITY),
            Err(InputError::NonFinite)
        );
        assert_eq!(snapshot.target_bpm, 65.0);
    }

    #[test]
    fn test_set_spo2_clamps() {
        let mut snapshot = VitalsSnapshot::resting();
        snapshot.set_spo2(40);
        assert_eq!(snapshot.spo2, 85);
        snapshot.set_spo2(255);
        assert_eq!(snapshot.spo2, 100);
    }

    #[test]
    fn test_invalid_snapshot() {
        let mut snapshot = VitalsSnapshot::resting();
        snapshot.bpm = f32::NAN;
        assert!(!snapshot.is_valid());

        let mut snapshot = VitalsSnapshot::resting();
        snapshot.resp_rate = 40;
        assert!(!snapshot.is_valid());
    }

    #[test]
    fn test_activity_parse() {
        assert_eq!(Activity::parse("running"), Some(Activity::Running));
        assert_eq!(Activity::parse(" SLEEPING "), Some(Activity::Sleeping));
        assert_eq!(Activity::parse("swimming"), None);
    }
}
