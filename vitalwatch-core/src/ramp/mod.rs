//! Heart-rate ramping
//!
//! Moves the current heart rate toward its target by a bounded step per
//! tick, either at the idle step or at a scenario's budgeted speed.

pub mod controller;

pub use controller::*;
