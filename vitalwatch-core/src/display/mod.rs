//! Presentation values derived from the engine state
//!
//! Text and numbers a watch face shows. Rendering itself lives with the
//! host.

pub mod status;

pub use status::*;
