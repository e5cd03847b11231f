//! Geolocation from configuration

use vitalwatch_core::location::Coordinate;
use vitalwatch_core::traits::{GeoError, GeolocationProvider};

/// Reports a configured position, or no fix at all
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocation {
    coordinate: Option<Coordinate>,
}

impl FixedGeolocation {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

impl GeolocationProvider for FixedGeolocation {
    async fn locate(&mut self) -> Result<Coordinate, GeoError> {
        self.coordinate.ok_or(GeoError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_position() {
        let mut geo = FixedGeolocation::new(Some(Coordinate::new(17.44, 78.35)));
        assert_eq!(geo.locate().await, Ok(Coordinate::new(17.44, 78.35)));
    }

    #[tokio::test]
    async fn test_no_position() {
        let mut geo = FixedGeolocation::new(None);
        assert_eq!(geo.locate().await, Err(GeoError::Unavailable));
    }
}
