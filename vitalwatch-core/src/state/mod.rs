//! Scenario lifecycle state machine

pub mod events;
pub mod machine;

pub use events::*;
pub use machine::*;
