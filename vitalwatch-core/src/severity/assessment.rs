//! Combined assessment of a snapshot

use super::{
    classify_heart_rate, classify_oxygen, OxygenResult, SeverityResult, Severity, Status,
};
use crate::config::{HeartRateThresholds, OxygenThresholds};
use crate::vitals::VitalsSnapshot;

/// Heart-rate and oxygen classifications of one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub heart_rate: SeverityResult,
    pub oxygen: OxygenResult,
}

impl Assessment {
    /// Either reading is in its critical tier
    pub fn is_critical(&self) -> bool {
        self.heart_rate.status == Status::Critical || self.oxygen.status == Status::Critical
    }

    /// Either reading is in its alert tier
    pub fn is_alert(&self) -> bool {
        self.heart_rate.status == Status::Alert || self.oxygen.status == Status::Alert
    }

    /// Condition that warrants an automatic dispatch
    pub fn is_real_emergency(&self) -> bool {
        self.heart_rate.severity == Severity::High || self.oxygen.status == Status::Critical
    }
}

/// Classifier configured with a threshold set
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityClassifier {
    heart_rate: HeartRateThresholds,
    oxygen: OxygenThresholds,
}

impl SeverityClassifier {
    pub fn new(heart_rate: HeartRateThresholds, oxygen: OxygenThresholds) -> Self {
        Self { heart_rate, oxygen }
    }

    pub fn classify_heart_rate(&self, bpm: f32) -> SeverityResult {
        classify_heart_rate(bpm, &self.heart_rate)
    }

    pub fn classify_oxygen(&self, spo2: u8) -> OxygenResult {
        classify_oxygen(spo2, &self.oxygen)
    }

    /// Classify both readings of a snapshot
    pub fn assess(&self, snapshot: &VitalsSnapshot) -> Assessment {
        Assessment {
            heart_rate: self.classify_heart_rate(snapshot.bpm),
            oxygen: self.classify_oxygen(snapshot.spo2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assess(bpm: f32, spo2: u8) -> Assessment {
        let mut snapshot = VitalsSnapshot::resting();
        snapshot.bpm = bpm;
        snapshot.spo2 = spo2;
        SeverityClassifier::default().assess(&snapshot)
    }

    #[test]
    fn test_resting_is_quiet() {
        let a = assess(65.0, 98);
        assert!(!a.is_critical());
        assert!(!a.is_alert());
        assert!(!a.is_real_emergency());
    }

    #[test]
    fn test_elevated_is_alert_only() {
        let a = assess(135.0, 98);
        assert!(a.is_alert());
        assert!(!a.is_real_emergency());
    }

    #[test]
    fn test_real_emergency_sources() {
        assert!(assess(160.0, 98).is_real_emergency());
        assert!(assess(35.0, 98).is_real_emergency());
        assert!(assess(80.0, 88).is_real_emergency());
        assert!(!assess(80.0, 92).is_real_emergency());
    }
}
