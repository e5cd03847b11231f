//! Watch face rendering

use core::fmt;

use rand::Rng;

use vitalwatch_core::alert::StatusDisplay;
use vitalwatch_core::ecg::StrokeColor;
use vitalwatch_core::engine::VitalsEngine;
use vitalwatch_core::vitals::Activity;

/// Sparkline glyphs, lowest first
const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One rendered watch face
#[derive(Debug, Clone, PartialEq)]
pub struct WatchFrame {
    /// Wall-clock time, `HH:MM`
    pub clock: String,
    /// Displayed (jittered) heart rate
    pub bpm: i32,
    pub spo2: u8,
    pub temperature_c: f32,
    pub bp_sys: u16,
    pub bp_dia: u16,
    pub resp_rate: u8,
    pub activity: Activity,
    /// Watch status line
    pub status: String,
    /// System status line
    pub system: StatusDisplay,
    pub stroke: StrokeColor,
    pub sparkline: String,
}

impl WatchFrame {
    /// Capture the engine's current face
    ///
    /// `trace` is scratch space for one ECG frame; its length is the
    /// canvas width.
    pub fn capture<R: Rng + ?Sized>(
        engine: &VitalsEngine,
        clock: &str,
        rng: &mut R,
        trace: &mut [f32],
        sparkline_width: usize,
    ) -> Self {
        let stroke = engine.render_ecg(rng, trace);
        let s = engine.snapshot();

        Self {
            clock: clock.to_string(),
            bpm: engine.display_bpm().round() as i32,
            spo2: s.spo2,
            temperature_c: s.temperature_c,
            bp_sys: s.bp_sys,
            bp_dia: s.bp_dia,
            resp_rate: s.resp_rate,
            activity: s.activity,
            status: engine.watch_status().as_str().to_string(),
            system: engine.status_display(),
            stroke,
            sparkline: sparkline(trace, sparkline_width),
        }
    }
}

impl fmt::Display for WatchFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} BPM | SpO2 {}% | {:.1}°C | BP {}/{} | RR {} | {} | {} | {}",
            self.clock,
            self.bpm,
            self.spo2,
            self.temperature_c,
            self.bp_sys,
            self.bp_dia,
            self.resp_rate,
            self.activity,
            self.status,
            self.system,
        )
    }
}

/// Downsample an ECG trace to `width` glyphs
///
/// Each glyph shows the sample with the largest deflection in its bucket.
/// Trace values grow downward, so they are flipped here.
pub fn sparkline(trace: &[f32], width: usize) -> String {
    if trace.is_empty() || width == 0 {
        return String::new();
    }

    let buckets = width.min(trace.len());
    let heights: Vec<f32> = (0..buckets)
        .map(|i| {
            let start = i * trace.len() / buckets;
            let end = ((i + 1) * trace.len() / buckets).max(start + 1);
            trace[start..end]
                .iter()
                .copied()
                .fold(0.0f32, |peak, y| if y.abs() > peak.abs() { y } else { peak })
        })
        .map(|y| -y)
        .collect();

    let lo = heights.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = heights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = hi - lo;

    heights
        .iter()
        .map(|h| {
            if span <= f32::EPSILON {
                return LEVELS[0];
            }
            let level = ((h - lo) / span * (LEVELS.len() - 1) as f32).round() as usize;
            LEVELS[level.min(LEVELS.len() - 1)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use vitalwatch_core::config::EngineConfig;

    #[test]
    fn test_sparkline_width() {
        let trace = vec![0.0f32; 240];
        let line = sparkline(&trace, 48);
        assert_eq!(line.chars().count(), 48);
        assert!(line.chars().all(|c| c == '▁'));
    }

    #[test]
    fn test_sparkline_peak_is_tallest() {
        let mut trace = vec![0.0f32; 40];
        // R wave deflects up (negative)
        trace[20] = -50.0;
        trace[22] = 15.0;
        let line: Vec<char> = sparkline(&trace, 10).chars().collect();
        assert_eq!(line[5], '█');
        assert!(line.iter().filter(|c| **c == '█').count() == 1);
    }

    #[test]
    fn test_sparkline_degenerate_inputs() {
        assert_eq!(sparkline(&[], 10), "");
        assert_eq!(sparkline(&[1.0, 2.0], 0), "");
        assert_eq!(sparkline(&[1.0, 2.0], 10).chars().count(), 2);
    }

    #[test]
    fn test_capture_resting_face() {
        let engine = VitalsEngine::new(EngineConfig::default(), 240, 0);
        let mut rng = SmallRng::seed_from_u64(3);
        let mut trace = vec![0.0f32; 240];

        let frame = WatchFrame::capture(&engine, "09:41", &mut rng, &mut trace, 48);
        assert_eq!(frame.bpm, 65);
        assert_eq!(frame.stroke, StrokeColor::Nominal);
        assert_eq!(frame.system, StatusDisplay::Baseline);
        assert_eq!(frame.sparkline.chars().count(), 48);

        let line = frame.to_string();
        assert!(line.starts_with("09:41 | 65 BPM | SpO2 98%"));
        assert!(line.ends_with("Monitoring"));
    }
}
