//! Periodic task scheduling
//!
//! Every recurring job of the engine is a named task with a fixed period.
//! Tasks due at the same instant run in a fixed order.

pub mod cadence;
pub mod tasks;

pub use cadence::*;
pub use tasks::*;
