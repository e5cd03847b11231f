//! Platform-agnostic core logic for the Vitalwatch simulator
//!
//! This crate contains every piece of simulation and alerting logic that
//! does not depend on a runtime, a clock source or an I/O stack:
//!
//! - Severity classification of heart rate and oxygen saturation
//! - Derived vitals (ambient jitter and stress derivation)
//! - Heart-rate ramping toward a target
//! - Scripted stress scenarios and their state machine
//! - Alert dispatch decisions (latch and cooldown)
//! - ECG waveform synthesis
//! - Location ranking of nearby hospitals
//! - Cadence scheduling and the owned simulation context
//! - Collaborator traits (geolocation, hospital directory, alert transport)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod alert;
pub mod config;
pub mod display;
pub mod ecg;
pub mod engine;
pub mod location;
pub mod ramp;
pub mod scenario;
pub mod scheduler;
pub mod severity;
pub mod state;
pub mod traits;
pub mod vitals;
