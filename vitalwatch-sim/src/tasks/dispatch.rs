//! Alert dispatch task
//!
//! Turns alert requests into wire payloads and hands them to the
//! transport. Sends are bounded by a timeout and their outcome is only
//! logged; a slow endpoint never stalls the engine.

use chrono::{DateTime, SecondsFormat, Utc};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use vitalwatch_core::alert::AlertRequest;
use vitalwatch_core::traits::AlertTransport;
use vitalwatch_protocol::{encode, AlertPayload, DeviceInfo, DispatchContext};

use crate::channels::{ALERT_CHANNEL, LOCATION_CONTEXT};
use crate::tasks::location::LocationContext;

/// Dispatch task settings
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub device: DeviceInfo,
    /// Limit for one send
    pub timeout: Duration,
}

/// Build the payload for `request` as of wall-clock time `at`
pub fn build_payload(
    request: &AlertRequest,
    device: &DeviceInfo,
    location: &LocationContext,
    at: DateTime<Utc>,
) -> AlertPayload {
    let timestamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let ctx = DispatchContext {
        device,
        location: location.fix,
        hospitals: &location.hospitals,
        timestamp: &timestamp,
        epoch_ms: u64::try_from(at.timestamp_millis()).unwrap_or(0),
    };
    AlertPayload::assemble(request, &ctx)
}

/// Dispatch task - sends every alert the controller raises
pub async fn dispatch_task<T: AlertTransport>(mut transport: T, settings: DispatchSettings) {
    info!("Dispatch task started");

    loop {
        let request = ALERT_CHANNEL.receive().await;
        let location = LOCATION_CONTEXT.lock().await.clone();

        let payload = build_payload(&request, &settings.device, &location, Utc::now());
        let body = match encode(&payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(event_id = %payload.event_id, "Failed to encode alert: {}", e);
                continue;
            }
        };

        debug!(event_id = %payload.event_id, bytes = body.len(), "Broadcasting alert");
        match timeout(settings.timeout, transport.send(&body)).await {
            Ok(Ok(())) => info!(event_id = %payload.event_id, "Alert delivered"),
            Ok(Err(e)) => warn!(event_id = %payload.event_id, "Alert send failed: {}", e),
            Err(_) => warn!(event_id = %payload.event_id, "Alert send timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vitalwatch_core::alert::{scenario_message, AlertTrigger};
    use vitalwatch_core::config::{HeartRateThresholds, OxygenThresholds};
    use vitalwatch_core::location::{mock_hospitals, Coordinate, LocationFix};
    use vitalwatch_core::scenario::ScenarioKind;
    use vitalwatch_core::severity::{Severity, SeverityClassifier, Status};
    use vitalwatch_core::vitals::VitalsSnapshot;

    fn request(bpm: f32) -> AlertRequest {
        let mut snapshot = VitalsSnapshot::resting();
        snapshot.bpm = bpm;
        snapshot.target_bpm = bpm;
        let assessment = SeverityClassifier::new(
            HeartRateThresholds::default(),
            OxygenThresholds::default(),
        )
        .assess(&snapshot);

        AlertRequest {
            trigger: AlertTrigger::Scripted(ScenarioKind::Hazard),
            message: scenario_message(ScenarioKind::Hazard, bpm as u16),
            snapshot,
            assessment,
            issued_at_ms: 8_000,
        }
    }

    #[test]
    fn test_build_payload_fields() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let location = LocationContext {
            fix: LocationFix::acquired(Coordinate::new(17.44, 78.35)),
            hospitals: mock_hospitals(),
        };

        let payload = build_payload(&request(172.0), &DeviceInfo::default(), &location, at);
        assert_eq!(payload.message, "Hazard Event: BPM 172");
        assert_eq!(payload.event_id, format!("EVT-{}", at.timestamp_millis()));
        assert_eq!(payload.status, Status::Critical);
        assert_eq!(payload.severity, Severity::High);
        assert_eq!(payload.vitals.hr, 172);
        assert_eq!(payload.location.timestamp, "2026-03-01T12:30:00.000Z");
        assert!(payload.location.available);
        assert_eq!(payload.nearest_hospitals.len(), 3);
    }

    #[test]
    fn test_build_payload_before_location() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let payload = build_payload(
            &request(135.0),
            &DeviceInfo::default(),
            &LocationContext::pending(),
            at,
        );

        assert!(!payload.location.available);
        assert_eq!(payload.location.lat, 17.5142);
        assert_eq!(payload.location.lon, 78.3948);
        assert!(payload.nearest_hospitals.is_empty());
    }

    #[test]
    fn test_payload_encodes_as_json() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
        let payload = build_payload(
            &request(160.0),
            &DeviceInfo::default(),
            &LocationContext::pending(),
            at,
        );

        let body = encode(&payload).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["device"]["id"], "SH-PRO-V2");
        assert_eq!(value["vitals"]["temperature_unit"], "°C");
        assert_eq!(value["status"], "CRITICAL");
    }
}
