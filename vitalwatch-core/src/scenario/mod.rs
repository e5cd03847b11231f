//! Scripted stress scenarios
//!
//! A scenario picks a random target inside its band, ramps the heart rate
//! there on a fixed tick budget, forces an alert on arrival and stops
//! itself after a hold time.

pub mod driver;
pub mod kind;

pub use driver::*;
pub use kind::*;
