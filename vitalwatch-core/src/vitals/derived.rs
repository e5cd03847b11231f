//! Derived vitals model
//!
//! Two mutations of the secondary vitals: a slow random walk inside a band
//! (ambient jitter) and a deterministic derivation from the scenario target
//! (stress). A stress derivation widens the band the walk is clamped to
//! until bounds are explicitly reset.

use libm::floorf;
use rand::Rng;

use super::VitalsSnapshot;
use crate::config::{JitterConfig, VitalBounds, RESTING_BOUNDS, STRESS_BOUNDS};

/// Heart rate at which stress is zero
pub const STRESS_BASELINE_BPM: f32 = 65.0;
/// BPM span mapped to a stress of 1.0
pub const STRESS_SPAN_BPM: f32 = 130.0;
/// Targets above this start to depress oxygen saturation
pub const SPO2_DROP_ABOVE_BPM: f32 = 160.0;
/// Saturation never derived below this
pub const SPO2_STRESS_FLOOR: u8 = 92;

/// Which band ambient jitter clamps into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsMode {
    #[default]
    Resting,
    Stressed,
}

impl BoundsMode {
    pub fn bounds(&self) -> &'static VitalBounds {
        match self {
            BoundsMode::Resting => &RESTING_BOUNDS,
            BoundsMode::Stressed => &STRESS_BOUNDS,
        }
    }
}

/// Secondary vitals produced by a stress derivation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedVitals {
    pub temperature_c: f32,
    pub bp_sys: u16,
    pub bp_dia: u16,
    pub resp_rate: u8,
    pub spo2: u8,
}

/// Normalised stress for a target heart rate
pub fn stress_level(target_bpm: f32) -> f32 {
    (target_bpm - STRESS_BASELINE_BPM) / STRESS_SPAN_BPM
}

/// Derive the secondary vitals for a scenario target
///
/// Pure; the same target always yields the same readings.
pub fn derive_from_stress(target_bpm: f32) -> DerivedVitals {
    let stress = stress_level(target_bpm);
    let b = &STRESS_BOUNDS;

    let spo2 = if target_bpm <= SPO2_DROP_ABOVE_BPM {
        98
    } else {
        let drop = floorf((target_bpm - SPO2_DROP_ABOVE_BPM) / 10.0) as i32;
        (98 - drop).max(SPO2_STRESS_FLOOR as i32) as u8
    };

    DerivedVitals {
        temperature_c: b.temperature_c.clamp(36.5 + stress),
        bp_sys: b.bp_sys.offset(120, floorf(stress * 40.0) as i32),
        bp_dia: b.bp_dia.offset(80, floorf(stress * 20.0) as i32),
        resp_rate: b.resp_rate.offset(16, floorf(stress * 8.0) as i32),
        spo2,
    }
}

/// Draw a nudge from `[-magnitude, magnitude)`
fn nudge<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> f32 {
    if magnitude > 0.0 && magnitude.is_finite() {
        rng.gen_range(-magnitude..magnitude)
    } else {
        0.0
    }
}

/// Drifts the secondary vitals and applies stress derivations
#[derive(Debug, Clone)]
pub struct DerivedVitalsModel {
    jitter: JitterConfig,
    mode: BoundsMode,
}

impl DerivedVitalsModel {
    pub fn new(jitter: JitterConfig) -> Self {
        Self {
            jitter,
            mode: BoundsMode::Resting,
        }
    }

    /// Band ambient jitter currently clamps into
    pub fn mode(&self) -> BoundsMode {
        self.mode
    }

    /// One ambient jitter step
    ///
    /// Temperature, blood pressure and respiration take a small random step
    /// and are clamped to the active band. Heart rate and saturation are
    /// left alone.
    pub fn apply_ambient_jitter<R: Rng + ?Sized>(
        &self,
        snapshot: &mut VitalsSnapshot,
        rng: &mut R,
    ) {
        let b = self.mode.bounds();
        let j = &self.jitter;

        snapshot.temperature_c = b
            .temperature_c
            .clamp(snapshot.temperature_c + nudge(rng, j.temperature_c));
        snapshot.bp_sys = b
            .bp_sys
            .offset(snapshot.bp_sys, floorf(nudge(rng, j.bp_sys)) as i32);
        snapshot.bp_dia = b
            .bp_dia
            .offset(snapshot.bp_dia, floorf(nudge(rng, j.bp_dia)) as i32);
        snapshot.resp_rate = b
            .resp_rate
            .offset(snapshot.resp_rate, floorf(nudge(rng, j.resp_rate)) as i32);
    }

    /// Write the stress derivation for `target_bpm` into the snapshot
    ///
    /// Switches ambient jitter to the stress band.
    pub fn apply_stress(&mut self, snapshot: &mut VitalsSnapshot, target_bpm: f32) -> DerivedVitals {
        let derived = derive_from_stress(target_bpm);
        snapshot.temperature_c = derived.temperature_c;
        snapshot.bp_sys = derived.bp_sys;
        snapshot.bp_dia = derived.bp_dia;
        snapshot.resp_rate = derived.resp_rate;
        snapshot.spo2 = derived.spo2;
        self.mode = BoundsMode::Stressed;
        derived
    }

    /// Return ambient jitter to the resting band
    pub fn reset_bounds(&mut self) {
        self.mode = BoundsMode::Resting;
    }
}
