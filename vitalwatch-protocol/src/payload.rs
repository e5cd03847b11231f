//! Alert payload types and assembly
//!
//! A payload is assembled once, at dispatch time, from the engine's alert
//! request plus the host's location context. It is never mutated after.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use vitalwatch_core::alert::AlertRequest;
use vitalwatch_core::location::{LocationFix, RankedHospital};
use vitalwatch_core::severity::{Severity, Status};
use vitalwatch_core::vitals::Activity;

use crate::encode::event_id;

pub const TEMPERATURE_UNIT: &str = "°C";
pub const BLOOD_PRESSURE_UNIT: &str = "mmHg";
pub const RESPIRATORY_RATE_UNIT: &str = "bpm";

/// Reporting device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: String,
    pub battery: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            id: "SH-PRO-V2".to_string(),
            battery: "88%".to_string(),
        }
    }
}

/// Vitals block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsReport {
    /// Heart rate rounded to a whole beat
    pub hr: i32,
    pub hr_status: Status,
    pub hr_severity: Severity,
    pub ox: u8,
    pub ox_status: Status,
    /// Rounded to one decimal
    pub temperature: f32,
    pub temperature_unit: String,
    pub blood_pressure_systolic: u16,
    pub blood_pressure_diastolic: u16,
    pub blood_pressure_unit: String,
    pub respiratory_rate: u8,
    pub respiratory_rate_unit: String,
    pub activity: Activity,
}

/// Location block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReport {
    pub lat: f64,
    pub lon: f64,
    /// RFC 3339 UTC
    pub timestamp: String,
    /// False when lat/lon are the fallback coordinate
    pub available: bool,
}

/// Nearby hospital entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalReport {
    pub name: String,
    pub city: String,
    pub village: String,
    pub address: String,
    /// Kilometres from the wearer
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl From<&RankedHospital> for HospitalReport {
    fn from(h: &RankedHospital) -> Self {
        Self {
            name: h.name.as_str().to_string(),
            city: h.city.as_str().to_string(),
            village: h.village.as_str().to_string(),
            address: h.address.as_str().to_string(),
            distance: h.distance_km,
            lat: h.coordinate.map(|c| c.lat),
            lon: h.coordinate.map(|c| c.lon),
        }
    }
}

/// Outgoing alert body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub message: String,
    pub event_id: String,
    /// Heart-rate tier status
    pub status: Status,
    /// Heart-rate tier severity
    pub severity: Severity,
    pub device: DeviceInfo,
    pub vitals: VitalsReport,
    pub location: LocationReport,
    pub nearest_hospitals: Vec<HospitalReport>,
}

/// Host-side context captured at dispatch time
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    pub device: &'a DeviceInfo,
    pub location: LocationFix,
    pub hospitals: &'a [RankedHospital],
    /// RFC 3339 UTC timestamp
    pub timestamp: &'a str,
    /// Wall-clock time (ms since the Unix epoch)
    pub epoch_ms: u64,
}

/// Round to one decimal place
fn round_tenth(value: f32) -> f32 {
    libm::roundf(value * 10.0) / 10.0
}

impl AlertPayload {
    /// Assemble the payload for an alert request
    pub fn assemble(request: &AlertRequest, ctx: &DispatchContext<'_>) -> Self {
        let s = &request.snapshot;
        let a = &request.assessment;

        Self {
            message: request.message.as_str().to_string(),
            event_id: event_id(ctx.epoch_ms),
            status: request.status(),
            severity: request.severity(),
            device: ctx.device.clone(),
            vitals: VitalsReport {
                hr: s.rounded_bpm(),
                hr_status: a.heart_rate.status,
                hr_severity: a.heart_rate.severity,
                ox: s.spo2,
                ox_status: a.oxygen.status,
                temperature: round_tenth(s.temperature_c),
                temperature_unit: TEMPERATURE_UNIT.to_string(),
                blood_pressure_systolic: s.bp_sys,
                blood_pressure_diastolic: s.bp_dia,
                blood_pressure_unit: BLOOD_PRESSURE_UNIT.to_string(),
                respiratory_rate: s.resp_rate,
                respiratory_rate_unit: RESPIRATORY_RATE_UNIT.to_string(),
                activity: s.activity,
            },
            location: LocationReport {
                lat: ctx.location.coordinate.lat,
                lon: ctx.location.coordinate.lon,
                timestamp: ctx.timestamp.to_string(),
                available: ctx.location.available,
            },
            nearest_hospitals: ctx.hospitals.iter().map(HospitalReport::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalwatch_core::alert::AlertDispatcher;
    use vitalwatch_core::config::AlertConfig;
    use vitalwatch_core::location::{mock_hospitals, Coordinate};
    use vitalwatch_core::scenario::ScenarioKind;
    use vitalwatch_core::severity::SeverityClassifier;
    use vitalwatch_core::vitals::VitalsSnapshot;

    fn hazard_request() -> AlertRequest {
        let mut snapshot = VitalsSnapshot::resting();
        snapshot.bpm = 172.4;
        snapshot.target_bpm = 172.0;
        snapshot.temperature_c = 37.3538;
        snapshot.activity = Activity::Running;
        let assessment = SeverityClassifier::default().assess(&snapshot);
        AlertDispatcher::new(&AlertConfig::default()).force(
            ScenarioKind::Hazard,
            172,
            &snapshot,
            &assessment,
            8000,
        )
    }

    #[test]
    fn test_assemble_from_scenario_alert() {
        let request = hazard_request();
        let device = DeviceInfo::default();
        let hospitals = mock_hospitals();
        let ctx = DispatchContext {
            device: &device,
            location: LocationFix::fallback(),
            hospitals: &hospitals,
            timestamp: "2026-01-01T00:00:00.000Z",
            epoch_ms: 1_767_225_600_000,
        };

        let payload = AlertPayload::assemble(&request, &ctx);
        assert_eq!(payload.message, "Hazard Event: BPM 172");
        assert_eq!(payload.event_id, "EVT-1767225600000");
        assert_eq!(payload.status, Status::Critical);
        assert_eq!(payload.severity, Severity::High);
        assert_eq!(payload.device.id, "SH-PRO-V2");
        assert_eq!(payload.vitals.hr, 172);
        assert_eq!(payload.vitals.temperature, 37.4);
        assert_eq!(payload.vitals.temperature_unit, "°C");
        assert_eq!(payload.vitals.activity, Activity::Running);
        assert_eq!(payload.location.lat, 17.5142);
        assert!(!payload.location.available);
        assert_eq!(payload.nearest_hospitals.len(), 3);
        assert_eq!(payload.nearest_hospitals[0].lat, None);
    }

    #[test]
    fn test_acquired_location_and_ranked_hospitals() {
        let request = hazard_request();
        let device = DeviceInfo {
            id: "WATCH-7".to_string(),
            battery: "41%".to_string(),
        };
        let origin = Coordinate::new(17.44, 78.35);
        let hospitals = vitalwatch_core::location::rank_nearest(
            origin,
            &[vitalwatch_core::location::HospitalCandidate {
                name: vitalwatch_core::location::field("Care Hospital"),
                city: vitalwatch_core::location::field("Hyderabad"),
                village: vitalwatch_core::location::Field::new(),
                address: vitalwatch_core::location::field("Road No. 1, Hyderabad"),
                coordinate: Coordinate::new(17.45, 78.36),
            }],
        );
        let ctx = DispatchContext {
            device: &device,
            location: LocationFix::acquired(origin),
            hospitals: &hospitals,
            timestamp: "2026-01-01T00:00:00.000Z",
            epoch_ms: 1,
        };

        let payload = AlertPayload::assemble(&request, &ctx);
        assert!(payload.location.available);
        assert_eq!(payload.location.lat, 17.44);
        assert_eq!(payload.device.battery, "41%");
        let h = &payload.nearest_hospitals[0];
        assert_eq!(h.city, "Hyderabad");
        assert_eq!(h.lat, Some(17.45));
        assert!(h.distance > 1.0 && h.distance < 2.0);
    }
}
