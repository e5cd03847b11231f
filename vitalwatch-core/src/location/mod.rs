//! Wearer location and nearby hospital ranking

pub mod geo;
pub mod hospitals;

pub use geo::*;
pub use hospitals::*;
