//! Clamp ranges for the vitals snapshot

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Band<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Band<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the band
    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Check if a value lies inside the band (edges included)
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Band<u16> {
    /// Add a signed delta, then clamp
    pub fn offset(&self, value: u16, delta: i32) -> u16 {
        let shifted = (value as i32 + delta).clamp(self.min as i32, self.max as i32);
        shifted as u16
    }
}

impl Band<u8> {
    /// Add a signed delta, then clamp
    pub fn offset(&self, value: u8, delta: i32) -> u8 {
        let shifted = (value as i32 + delta).clamp(self.min as i32, self.max as i32);
        shifted as u8
    }
}

/// Clamp ranges for the fields the derived-vitals model drifts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalBounds {
    pub temperature_c: Band<f32>,
    pub bp_sys: Band<u16>,
    pub bp_dia: Band<u16>,
    pub resp_rate: Band<u8>,
}

/// Ranges ambient jitter stays inside while the wearer is at rest
pub const RESTING_BOUNDS: VitalBounds = VitalBounds {
    temperature_c: Band::new(36.0, 37.5),
    bp_sys: Band::new(110, 130),
    bp_dia: Band::new(70, 85),
    resp_rate: Band::new(14, 18),
};

/// Wider ranges used after a stress derivation
pub const STRESS_BOUNDS: VitalBounds = VitalBounds {
    temperature_c: Band::new(36.0, 38.0),
    bp_sys: Band::new(110, 170),
    bp_dia: Band::new(70, 105),
    resp_rate: Band::new(14, 26),
};
