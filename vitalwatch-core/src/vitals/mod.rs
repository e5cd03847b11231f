//! The vitals snapshot and the model that drifts its secondary fields

pub mod derived;
pub mod snapshot;

pub use derived::*;
pub use snapshot::*;
