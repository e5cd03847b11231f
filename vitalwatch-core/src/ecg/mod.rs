//! ECG waveform synthesis

pub mod synth;

pub use synth::*;
