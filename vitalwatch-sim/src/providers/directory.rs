//! Hospital directory backed by the configuration file
//!
//! Answers radius queries over the `[[location.hospitals]]` list. Entries
//! with missing text get the same placeholders a live directory lookup
//! would use for untagged records.

use heapless::Vec;

use vitalwatch_core::location::{
    field, haversine_km, Coordinate, HospitalCandidate, MAX_CANDIDATES,
};
use vitalwatch_core::traits::{DirectoryError, HospitalDirectory};

use crate::config::HospitalEntry;

/// Name for records without one
pub const DEFAULT_NAME: &str = "Unnamed Medical Center";
/// City for records without one
pub const DEFAULT_CITY: &str = "Unknown City";
/// Address for records without one
pub const DEFAULT_ADDRESS: &str = "Location details unavailable";

/// Directory over a fixed hospital list
#[derive(Debug, Clone, Default)]
pub struct ConfiguredHospitalDirectory {
    entries: std::vec::Vec<HospitalEntry>,
}

impl ConfiguredHospitalDirectory {
    pub fn new(entries: std::vec::Vec<HospitalEntry>) -> Self {
        Self { entries }
    }

    fn candidate(entry: &HospitalEntry) -> HospitalCandidate {
        HospitalCandidate {
            name: field(entry.name.as_deref().unwrap_or(DEFAULT_NAME)),
            city: field(entry.city.as_deref().unwrap_or(DEFAULT_CITY)),
            village: field(entry.village.as_deref().unwrap_or("")),
            address: field(entry.address.as_deref().unwrap_or(DEFAULT_ADDRESS)),
            coordinate: Coordinate::new(entry.lat, entry.lon),
        }
    }
}

impl HospitalDirectory for ConfiguredHospitalDirectory {
    async fn search(
        &mut self,
        origin: Coordinate,
        radius_m: u32,
        out: &mut Vec<HospitalCandidate, MAX_CANDIDATES>,
    ) -> Result<(), DirectoryError> {
        let radius_km = radius_m as f64 / 1000.0;

        for entry in &self.entries {
            let candidate = Self::candidate(entry);
            if !candidate.coordinate.is_valid() {
                continue;
            }
            if haversine_km(origin, candidate.coordinate) > radius_km {
                continue;
            }
            if out.push(candidate).is_err() {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: Option<&str>, lat: f64, lon: f64) -> HospitalEntry {
        HospitalEntry {
            name: name.map(str::to_string),
            city: None,
            village: None,
            address: None,
            lat,
            lon,
        }
    }

    #[tokio::test]
    async fn test_radius_filter() {
        let origin = Coordinate::new(17.44, 78.35);
        let mut dir = ConfiguredHospitalDirectory::new(vec![
            entry(Some("Near"), 17.45, 78.35),
            // ~111 km north
            entry(Some("Far"), 18.44, 78.35),
        ]);

        let mut out = Vec::new();
        dir.search(origin, 10_000, &mut out).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name.as_str(), "Near");
    }

    #[tokio::test]
    async fn test_missing_fields_get_placeholders() {
        let origin = Coordinate::new(17.44, 78.35);
        let mut dir = ConfiguredHospitalDirectory::new(vec![entry(None, 17.44, 78.35)]);

        let mut out = Vec::new();
        dir.search(origin, 10_000, &mut out).await.unwrap();
        assert_eq!(out[0].name.as_str(), DEFAULT_NAME);
        assert_eq!(out[0].city.as_str(), DEFAULT_CITY);
        assert_eq!(out[0].village.as_str(), "");
        assert_eq!(out[0].address.as_str(), DEFAULT_ADDRESS);
    }

    #[tokio::test]
    async fn test_invalid_coordinates_skipped() {
        let origin = Coordinate::new(17.44, 78.35);
        let mut dir = ConfiguredHospitalDirectory::new(vec![entry(Some("Bad"), 95.0, 78.35)]);

        let mut out = Vec::new();
        dir.search(origin, 10_000, &mut out).await.unwrap();
        assert!(out.is_empty());
    }
}
