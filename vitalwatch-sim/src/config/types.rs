//! Host configuration types
//!
//! The `[engine.*]` tables deserialize straight into the core
//! `EngineConfig`; everything else is host-only.

use serde::Deserialize;

use vitalwatch_core::config::EngineConfig;
use vitalwatch_core::location::Coordinate;
use vitalwatch_protocol::DeviceInfo;

/// Complete simulator configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub engine: EngineConfig,
    pub device: DeviceInfo,
    pub location: LocationConfig,
    pub dispatch: DispatchConfig,
    pub display: DisplayConfig,
}

/// One hospital known to the configured directory
///
/// Missing text fields take the directory defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HospitalEntry {
    pub name: Option<String>,
    pub city: Option<String>,
    pub village: Option<String>,
    pub address: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Wearer position and hospital lookup
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Fixed latitude; unset means no position fix
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Directory search radius (metres)
    pub search_radius_m: u32,
    /// Limit for each location or directory request (ms)
    pub timeout_ms: u64,
    pub hospitals: Vec<HospitalEntry>,
}

impl LocationConfig {
    /// Configured position, when both halves are set
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            lat: None,
            lon: None,
            search_radius_m: 10_000,
            timeout_ms: 5_000,
            hospitals: Vec::new(),
        }
    }
}

/// Alert delivery
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Destination for alert payloads
    pub endpoint: String,
    /// Limit for one send (ms)
    pub timeout_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8081/healthcare".to_string(),
            timeout_ms: 5_000,
        }
    }
}

/// Console watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ECG canvas width (px)
    pub ecg_width: u32,
    /// Characters in the logged ECG sparkline
    pub sparkline_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            ecg_width: 240,
            sparkline_width: 48,
        }
    }
}
