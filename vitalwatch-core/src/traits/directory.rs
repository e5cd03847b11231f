//! Hospital directory trait

use core::fmt;

use heapless::Vec;

use crate::location::{Coordinate, HospitalCandidate, MAX_CANDIDATES};

/// Errors that can occur querying the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryError {
    /// Directory service could not be reached
    Unreachable,
    /// Response could not be understood
    MalformedResponse,
    /// Query did not finish in time
    Timeout,
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Unreachable => f.write_str("hospital directory unreachable"),
            DirectoryError::MalformedResponse => f.write_str("malformed directory response"),
            DirectoryError::Timeout => f.write_str("hospital directory timed out"),
        }
    }
}

/// Radius search over hospitals and clinics
#[allow(async_fn_in_trait)]
pub trait HospitalDirectory {
    /// Find candidates within `radius_m` of `origin`
    ///
    /// Candidates beyond capacity are dropped by the implementation. Order
    /// does not matter; the caller ranks by distance.
    async fn search(
        &mut self,
        origin: Coordinate,
        radius_m: u32,
        out: &mut Vec<HospitalCandidate, MAX_CANDIDATES>,
    ) -> Result<(), DirectoryError>;
}
