//! Configuration loading
//!
//! Loads the simulator configuration from a TOML file or from the embedded
//! defaults.

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::*;
