//! Location resolution
//!
//! Runs once at startup: find the wearer, then the nearest hospitals.
//! Failures fall back (fallback coordinate, mock hospital list) and are
//! logged; alerts are never held back waiting for a location.

use tokio::time::{timeout, Duration};
use tracing::{info, warn};

use heapless::Vec;
use vitalwatch_core::location::{
    mock_hospitals, rank_nearest, LocationFix, NearestHospitals, MAX_CANDIDATES,
};
use vitalwatch_core::traits::{GeolocationProvider, HospitalDirectory};

use crate::channels::LOCATION_CONTEXT;

/// Location data attached to alerts
#[derive(Debug, Clone, PartialEq)]
pub struct LocationContext {
    pub fix: LocationFix,
    pub hospitals: NearestHospitals,
}

impl LocationContext {
    /// Before resolution: fallback coordinate, no hospitals
    pub const fn pending() -> Self {
        Self {
            fix: LocationFix::fallback(),
            hospitals: NearestHospitals::new(),
        }
    }
}

/// Find the wearer and the three nearest hospitals
pub async fn resolve_location<G, D>(
    geolocation: &mut G,
    directory: &mut D,
    radius_m: u32,
    limit: Duration,
) -> LocationContext
where
    G: GeolocationProvider,
    D: HospitalDirectory,
{
    let coordinate = match timeout(limit, geolocation.locate()).await {
        Ok(Ok(coordinate)) if coordinate.is_valid() => coordinate,
        Ok(Ok(coordinate)) => {
            warn!(lat = coordinate.lat, lon = coordinate.lon, "Location out of range");
            return fallback_context();
        }
        Ok(Err(e)) => {
            warn!("Location check failed: {}", e);
            return fallback_context();
        }
        Err(_) => {
            warn!("Location check timed out");
            return fallback_context();
        }
    };
    info!("Location found: {:.4}, {:.4}", coordinate.lat, coordinate.lon);

    let mut candidates: Vec<_, MAX_CANDIDATES> = Vec::new();
    let search = directory.search(coordinate, radius_m, &mut candidates);
    let hospitals = match timeout(limit, search).await {
        Ok(Ok(())) => {
            let ranked = rank_nearest(coordinate, &candidates);
            if ranked.is_empty() {
                warn!(radius_m, "No hospitals found nearby, using mock data");
                mock_hospitals()
            } else {
                info!(count = ranked.len(), "Found hospitals nearby");
                ranked
            }
        }
        Ok(Err(e)) => {
            warn!("Hospital search failed: {}, using mock data", e);
            mock_hospitals()
        }
        Err(_) => {
            warn!("Hospital search timed out, using mock data");
            mock_hospitals()
        }
    };

    LocationContext {
        fix: LocationFix::acquired(coordinate),
        hospitals,
    }
}

fn fallback_context() -> LocationContext {
    LocationContext {
        fix: LocationFix::fallback(),
        hospitals: mock_hospitals(),
    }
}

/// Location task - resolves once and publishes the result
pub async fn location_task<G, D>(
    mut geolocation: G,
    mut directory: D,
    radius_m: u32,
    limit: Duration,
) where
    G: GeolocationProvider,
    D: HospitalDirectory,
{
    info!("Location task started");

    let context = resolve_location(&mut geolocation, &mut directory, radius_m, limit).await;
    *LOCATION_CONTEXT.lock().await = context;
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalwatch_core::location::{field, Coordinate, HospitalCandidate, FALLBACK_COORDINATE};
    use vitalwatch_core::traits::{DirectoryError, GeoError};

    struct Geo(Result<Coordinate, GeoError>);

    impl GeolocationProvider for Geo {
        async fn locate(&mut self) -> Result<Coordinate, GeoError> {
            self.0
        }
    }

    struct Directory {
        result: Result<(), DirectoryError>,
        candidates: std::vec::Vec<HospitalCandidate>,
        searched: bool,
    }

    impl Directory {
        fn new(result: Result<(), DirectoryError>, names: &[(&str, f64)]) -> Self {
            Self {
                result,
                candidates: names
                    .iter()
                    .map(|(name, lat)| HospitalCandidate {
                        name: field(name),
                        city: field("Hyderabad"),
                        village: field(""),
                        address: field("Road"),
                        coordinate: Coordinate::new(*lat, 78.35),
                    })
                    .collect(),
                searched: false,
            }
        }
    }

    impl HospitalDirectory for Directory {
        async fn search(
            &mut self,
            _origin: Coordinate,
            _radius_m: u32,
            out: &mut Vec<HospitalCandidate, MAX_CANDIDATES>,
        ) -> Result<(), DirectoryError> {
            self.searched = true;
            for c in &self.candidates {
                let _ = out.push(c.clone());
            }
            self.result
        }
    }

    const LIMIT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_acquired_and_ranked() {
        let mut geo = Geo(Ok(Coordinate::new(17.44, 78.35)));
        let mut dir = Directory::new(
            Ok(()),
            &[("Far", 17.50), ("Near", 17.441), ("Mid", 17.46), ("Farthest", 17.52)],
        );

        let ctx = resolve_location(&mut geo, &mut dir, 10_000, LIMIT).await;
        assert!(ctx.fix.available);
        let names: std::vec::Vec<&str> = ctx.hospitals.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Near", "Mid", "Far"]);
    }

    #[tokio::test]
    async fn test_geolocation_failure_skips_search() {
        let mut geo = Geo(Err(GeoError::PermissionDenied));
        let mut dir = Directory::new(Ok(()), &[("Near", 17.441)]);

        let ctx = resolve_location(&mut geo, &mut dir, 10_000, LIMIT).await;
        assert!(!ctx.fix.available);
        assert_eq!(ctx.fix.coordinate, FALLBACK_COORDINATE);
        assert_eq!(ctx.hospitals, mock_hospitals());
        assert!(!dir.searched);
    }

    #[tokio::test]
    async fn test_empty_directory_uses_mock() {
        let mut geo = Geo(Ok(Coordinate::new(17.44, 78.35)));
        let mut dir = Directory::new(Ok(()), &[]);

        let ctx = resolve_location(&mut geo, &mut dir, 10_000, LIMIT).await;
        assert!(ctx.fix.available);
        assert_eq!(ctx.hospitals, mock_hospitals());
    }

    #[tokio::test]
    async fn test_directory_error_uses_mock() {
        let mut geo = Geo(Ok(Coordinate::new(17.44, 78.35)));
        let mut dir = Directory::new(Err(DirectoryError::Unreachable), &[("Near", 17.441)]);

        let ctx = resolve_location(&mut geo, &mut dir, 10_000, LIMIT).await;
        assert_eq!(ctx.hospitals, mock_hospitals());
    }

    #[test]
    fn test_pending_context() {
        let ctx = LocationContext::pending();
        assert!(!ctx.fix.available);
        assert!(ctx.hospitals.is_empty());
    }
}
