//! Clinical severity classification
//!
//! Maps raw readings to tiers. Pure, total functions only.

pub mod assessment;
pub mod classifier;

pub use assessment::*;
pub use classifier::*;
