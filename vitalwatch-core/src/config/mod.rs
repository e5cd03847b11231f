//! Configuration types
//!
//! Runtime-agnostic tuning structures. The host loads them from TOML when
//! the `serde` feature is enabled; every type has defaults matching the
//! reference simulator behaviour.

pub mod bounds;
pub mod types;

pub use bounds::*;
pub use types::*;
