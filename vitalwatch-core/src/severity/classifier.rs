//! Heart-rate and oxygen tier tables
//!
//! Both classifiers are total: every input maps to exactly one tier.
//! Non-finite readings are rejected before they get here; a NaN that slips
//! through lands in the low-rate alert tier.

use core::fmt;

use crate::config::{HeartRateThresholds, OxygenThresholds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Clinical status tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Status {
    Normal,
    Alert,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "NORMAL",
            Status::Alert => "ALERT",
            Status::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable heart-rate condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HeartRateLabel {
    #[cfg_attr(feature = "serde", serde(rename = "BRADYCARDIA"))]
    Bradycardia,
    #[cfg_attr(feature = "serde", serde(rename = "TACHYCARDIA"))]
    Tachycardia,
    #[cfg_attr(feature = "serde", serde(rename = "ELEVATED HR"))]
    ElevatedHr,
    #[cfg_attr(feature = "serde", serde(rename = "LOW HR"))]
    LowHr,
    #[cfg_attr(feature = "serde", serde(rename = "NORMAL"))]
    Normal,
}

impl HeartRateLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeartRateLabel::Bradycardia => "BRADYCARDIA",
            HeartRateLabel::Tachycardia => "TACHYCARDIA",
            HeartRateLabel::ElevatedHr => "ELEVATED HR",
            HeartRateLabel::LowHr => "LOW HR",
            HeartRateLabel::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for HeartRateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heart-rate classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityResult {
    pub status: Status,
    pub severity: Severity,
    pub label: HeartRateLabel,
}

/// Oxygen classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OxygenResult {
    pub status: Status,
}

/// Classify a heart rate
///
/// | bpm | status | severity | label |
/// |---|---|---|---|
/// | below bradycardia | CRITICAL | HIGH | BRADYCARDIA |
/// | above tachycardia | CRITICAL | HIGH | TACHYCARDIA |
/// | above normal max | ALERT | MEDIUM | ELEVATED HR |
/// | normal min ..= normal max | NORMAL | LOW | NORMAL |
/// | otherwise | ALERT | MEDIUM | LOW HR |
pub fn classify_heart_rate(bpm: f32, t: &HeartRateThresholds) -> SeverityResult {
    if bpm < t.bradycardia_below {
        SeverityResult {
            status: Status::Critical,
            severity: Severity::High,
            label: HeartRateLabel::Bradycardia,
        }
    } else if bpm > t.tachycardia_above {
        SeverityResult {
            status: Status::Critical,
            severity: Severity::High,
            label: HeartRateLabel::Tachycardia,
        }
    } else if bpm > t.normal_max {
        SeverityResult {
            status: Status::Alert,
            severity: Severity::Medium,
            label: HeartRateLabel::ElevatedHr,
        }
    } else if bpm >= t.normal_min {
        SeverityResult {
            status: Status::Normal,
            severity: Severity::Low,
            label: HeartRateLabel::Normal,
        }
    } else {
        SeverityResult {
            status: Status::Alert,
            severity: Severity::Medium,
            label: HeartRateLabel::LowHr,
        }
    }
}

/// Classify oxygen saturation
pub fn classify_oxygen(spo2: u8, t: &OxygenThresholds) -> OxygenResult {
    let status = if spo2 < t.critical_below {
        Status::Critical
    } else if spo2 <= t.alert_max {
        Status::Alert
    } else {
        Status::Normal
    };
    OxygenResult { status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hr(bpm: f32) -> SeverityResult {
        classify_heart_rate(bpm, &HeartRateThresholds::default())
    }

    fn ox(spo2: u8) -> Status {
        classify_oxygen(spo2, &OxygenThresholds::default()).status
    }

    #[test]
    fn test_bradycardia_boundary() {
        let r = hr(39.9);
        assert_eq!(r.status, Status::Critical);
        assert_eq!(r.severity, Severity::High);
        assert_eq!(r.label, HeartRateLabel::Bradycardia);

        let r = hr(40.0);
        assert_eq!(r.status, Status::Alert);
        assert_eq!(r.label, HeartRateLabel::LowHr);
    }

    #[test]
    fn test_normal_band_edges() {
        assert_eq!(hr(49.9).label, HeartRateLabel::LowHr);
        assert_eq!(hr(50.0).status, Status::Normal);
        assert_eq!(hr(50.0).severity, Severity::Low);
        assert_eq!(hr(120.0).status, Status::Normal);
    }

    #[test]
    fn test_elevated_band() {
        let r = hr(121.0);
        assert_eq!(r.status, Status::Alert);
        assert_eq!(r.severity, Severity::Medium);
        assert_eq!(r.label, HeartRateLabel::ElevatedHr);
        assert_eq!(hr(150.0).label, HeartRateLabel::ElevatedHr);
        // Fractional readings between the integer tiers
        assert_eq!(hr(120.5).label, HeartRateLabel::ElevatedHr);
    }

    #[test]
    fn test_tachycardia_boundary() {
        let r = hr(150.1);
        assert_eq!(r.status, Status::Critical);
        assert_eq!(r.severity, Severity::High);
        assert_eq!(r.label, HeartRateLabel::Tachycardia);
    }

    #[test]
    fn test_oxygen_tiers() {
        assert_eq!(ox(89), Status::Critical);
        assert_eq!(ox(90), Status::Alert);
        assert_eq!(ox(94), Status::Alert);
        assert_eq!(ox(95), Status::Normal);
        assert_eq!(ox(100), Status::Normal);
    }

    #[test]
    fn test_nan_is_not_critical() {
        let r = hr(f32::NAN);
        assert_eq!(r.severity, Severity::Medium);
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(HeartRateLabel::ElevatedHr.as_str(), "ELEVATED HR");
        assert_eq!(HeartRateLabel::LowHr.as_str(), "LOW HR");
        assert_eq!(Status::Critical.as_str(), "CRITICAL");
        assert_eq!(Severity::Medium.as_str(), "MEDIUM");
    }

    proptest! {
        #[test]
        fn prop_critical_iff_high(bpm in 20.0f32..=220.0) {
            let r = hr(bpm);
            prop_assert_eq!(r.status == Status::Critical, r.severity == Severity::High);
            prop_assert_eq!(r.status == Status::Normal, r.severity == Severity::Low);
        }

        #[test]
        fn prop_oxygen_total(spo2 in 0u8..=255) {
            let status = ox(spo2);
            prop_assert_eq!(status == Status::Critical, spo2 < 90);
        }
    }
}
