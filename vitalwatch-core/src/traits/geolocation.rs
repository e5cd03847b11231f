//! Geolocation provider trait

use core::fmt;

use crate::location::Coordinate;

/// Errors that can occur acquiring a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    /// Wearer or platform refused location access
    PermissionDenied,
    /// No fix could be computed
    Unavailable,
    /// Provider did not answer in time
    Timeout,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::PermissionDenied => f.write_str("location permission denied"),
            GeoError::Unavailable => f.write_str("location unavailable"),
            GeoError::Timeout => f.write_str("location request timed out"),
        }
    }
}

/// Source of the wearer's position
#[allow(async_fn_in_trait)]
pub trait GeolocationProvider {
    /// Acquire a single position fix
    async fn locate(&mut self) -> Result<Coordinate, GeoError>;
}
