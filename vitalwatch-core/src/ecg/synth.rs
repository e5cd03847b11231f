//! Scrolling PQRST trace
//!
//! The waveform is a pure function of time and heart rate. A scroll offset
//! decremented every frame maps trace columns to time, so the pattern
//! slides left at a fixed `seconds_on_screen` window regardless of rate.
//! Deflections are in pixels, negative is up.

use core::f64::consts::PI;

use libm::{fmod, sin};
use rand::Rng;

use crate::config::EcgConfig;
use crate::severity::Severity;

/// Stroke colour of the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeColor {
    Nominal,
    /// Reserved; nothing selects it today
    Warning,
    Alert,
}

impl StrokeColor {
    /// Pick the stroke for a heart-rate severity
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::High => StrokeColor::Alert,
            Severity::Medium | Severity::Low => StrokeColor::Nominal,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StrokeColor::Nominal => "#2ed573",
            StrokeColor::Warning => "#ffa502",
            StrokeColor::Alert => "#ff4757",
        }
    }
}

/// One segment of the beat: `[start, end)` in cycle units
struct Wave {
    start: f64,
    end: f64,
    /// Angular frequency multiplier (× π)
    freq: f64,
    /// Signed amplitude (px); negative deflects up
    amplitude: f64,
}

#[rustfmt::skip]
const WAVES: [Wave; 5] = [
    // P
    Wave { start: 0.10, end: 0.20, freq: 10.0, amplitude: -10.0 },
    // Q
    Wave { start: 0.35, end: 0.38, freq: 33.0, amplitude: 10.0 },
    // R
    Wave { start: 0.38, end: 0.42, freq: 25.0, amplitude: -50.0 },
    // S
    Wave { start: 0.42, end: 0.45, freq: 33.0, amplitude: 15.0 },
    // T
    Wave { start: 0.60, end: 0.75, freq: 6.6, amplitude: -15.0 },
];

/// Deflection at a position within one beat (`cycle` in `[0, 1)`)
pub fn deflection(cycle: f64) -> f32 {
    WAVES
        .iter()
        .find(|w| cycle >= w.start && cycle < w.end)
        .map(|w| sin((cycle - w.start) * PI * w.freq) * w.amplitude)
        .unwrap_or(0.0) as f32
}

/// Seconds per beat, rate floored at `min_bpm`
pub fn beat_duration(bpm: f32, min_bpm: f32) -> f64 {
    let rate = if bpm.is_finite() { bpm.max(min_bpm) } else { min_bpm };
    60.0 / rate.max(1.0) as f64
}

/// ECG synthesizer state (scroll offset only)
#[derive(Debug, Clone)]
pub struct EcgSynthesizer {
    config: EcgConfig,
    width: u32,
    /// Scroll offset in pixels, kept in `(-width, 0]`
    offset: f64,
}

impl EcgSynthesizer {
    pub fn new(config: EcgConfig, width: u32) -> Self {
        Self {
            config,
            width,
            offset: 0.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Pixels that represent one second of signal
    pub fn pixels_per_second(&self) -> f64 {
        let secs = self.config.seconds_on_screen.max(f32::EPSILON) as f64;
        self.width as f64 / secs
    }

    /// Scroll one frame left, wrapping at the trace width
    pub fn advance_frame(&mut self) {
        if self.width == 0 {
            return;
        }
        let fps = self.config.target_fps.max(1.0) as f64;
        let width = self.width as f64;
        self.offset -= self.pixels_per_second() / fps;
        if self.offset <= -width {
            self.offset += width;
        }
    }

    /// Time (s) shown at trace column `x`
    pub fn time_at(&self, x: u32) -> f64 {
        let pps = self.pixels_per_second();
        if pps <= 0.0 {
            return 0.0;
        }
        (x as f64 - self.offset) / pps
    }

    /// Noise-free deflection at time `t_s` for heart rate `bpm`
    pub fn waveform_at(&self, t_s: f64, bpm: f32) -> f32 {
        let beat = beat_duration(bpm, self.config.min_bpm);
        let mut phase = fmod(t_s, beat);
        if phase < 0.0 {
            phase += beat;
        }
        deflection(phase / beat)
    }

    /// Noise-free deflection at column `x`
    pub fn sample(&self, x: u32, bpm: f32) -> f32 {
        self.waveform_at(self.time_at(x), bpm)
    }

    /// Fill `trace` with one frame of samples, noise included
    ///
    /// Column `i` of `trace` is column `i` of the display. Does not scroll;
    /// call [`advance_frame`](Self::advance_frame) once per frame.
    pub fn render<R: Rng + ?Sized>(&self, bpm: f32, rng: &mut R, trace: &mut [f32]) {
        let noise = self.config.noise_px;
        for (x, y) in trace.iter_mut().enumerate() {
            let jitter = if noise > 0.0 {
                rng.gen_range(-noise..=noise)
            } else {
                0.0
            };
            *y = self.sample(x as u32, bpm) + jitter;
        }
    }
}
