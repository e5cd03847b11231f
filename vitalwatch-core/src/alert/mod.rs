//! Alert dispatch decisions
//!
//! Decides when an alert request is emitted. Assembling and sending the
//! outgoing payload happens outside the core.

pub mod dispatcher;
pub mod message;

pub use dispatcher::*;
pub use message::*;
