//! Coordinates and great-circle distance

use libm::{asin, cos, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for distances (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Coordinate used when no geolocation fix is available
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    lat: 17.5142,
    lon: 78.3948,
};

/// WGS84 latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check the coordinate is finite and within lat/lon ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Haversine distance between two coordinates (km)
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let s_lat = sin(d_lat / 2.0);
    let s_lon = sin(d_lon / 2.0);
    let h = s_lat * s_lat + cos(a.lat.to_radians()) * cos(b.lat.to_radians()) * s_lon * s_lon;
    2.0 * EARTH_RADIUS_KM * asin(sqrt(h.clamp(0.0, 1.0)))
}

/// Location attached to outgoing alerts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    /// False when `coordinate` is the fallback
    pub available: bool,
}

impl LocationFix {
    pub const fn acquired(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            available: true,
        }
    }

    pub const fn fallback() -> Self {
        Self {
            coordinate: FALLBACK_COORDINATE,
            available: false,
        }
    }
}

impl Default for LocationFix {
    fn default() -> Self {
        Self::fallback()
    }
}
