//! Nearest-hospital ranking
//!
//! The directory returns raw candidates; ranking keeps the three closest.
//! When the directory fails or finds nothing, a fixed mock list stands in.

use core::cmp::Ordering;

use heapless::{String, Vec};

use super::{haversine_km, Coordinate};

/// Maximum text field length (bytes)
pub const MAX_FIELD_LEN: usize = 64;

/// Hospitals kept after ranking
pub const NEAREST_COUNT: usize = 3;

/// Maximum candidates a directory query may return
pub const MAX_CANDIDATES: usize = 32;

/// Bounded text field
pub type Field = String<MAX_FIELD_LEN>;

/// Copy `text` into a bounded field, truncating on a char boundary
pub fn field(text: &str) -> Field {
    let mut out = Field::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Directory search result before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalCandidate {
    pub name: Field,
    pub city: Field,
    pub village: Field,
    pub address: Field,
    pub coordinate: Coordinate,
}

/// Hospital listed in an alert payload
#[derive(Debug, Clone, PartialEq)]
pub struct RankedHospital {
    pub name: Field,
    pub city: Field,
    pub village: Field,
    pub address: Field,
    pub distance_km: f64,
    /// Unknown for mock entries
    pub coordinate: Option<Coordinate>,
}

/// Ranked hospital list
pub type NearestHospitals = Vec<RankedHospital, NEAREST_COUNT>;

/// Rank candidates by distance from `origin`, keeping the nearest three
///
/// Ties keep directory order. Candidates with a non-finite distance are
/// skipped.
pub fn rank_nearest(origin: Coordinate, candidates: &[HospitalCandidate]) -> NearestHospitals {
    let mut ranked = NearestHospitals::new();

    for candidate in candidates {
        let distance_km = haversine_km(origin, candidate.coordinate);
        if !distance_km.is_finite() {
            continue;
        }

        let pos = ranked
            .iter()
            .position(|h| distance_km.partial_cmp(&h.distance_km) == Some(Ordering::Less))
            .unwrap_or(ranked.len());
        if pos >= NEAREST_COUNT {
            continue;
        }
        if ranked.is_full() {
            ranked.pop();
        }

        let entry = RankedHospital {
            name: candidate.name.clone(),
            city: candidate.city.clone(),
            village: candidate.village.clone(),
            address: candidate.address.clone(),
            distance_km,
            coordinate: Some(candidate.coordinate),
        };
        // Cannot fail: a slot was freed above
        let _ = ranked.insert(pos, entry);
    }

    ranked
}

/// Fixed list used when the directory is unavailable
pub fn mock_hospitals() -> NearestHospitals {
    let entries = [
        ("City General Hospital (Mock)", "123 Main St, Tech City", 1.2),
        ("St. Mary’s Emergency (Mock)", "456 Oak Rd, Metro Area", 2.5),
        ("Advanced Care Clinic (Mock)", "789 Pine Ave, Suburbia", 4.1),
    ];

    let mut list = NearestHospitals::new();
    for (name, address, distance_km) in entries {
        let _ = list.push(RankedHospital {
            name: field(name),
            city: Field::new(),
            village: Field::new(),
            address: field(address),
            distance_km,
            coordinate: None,
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, lat: f64, lon: f64) -> HospitalCandidate {
        HospitalCandidate {
            name: field(name),
            city: field("Hyderabad"),
            village: Field::new(),
            address: field("Road"),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    #[test]
    fn test_keeps_three_nearest_in_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let candidates = [
            candidate("far", 0.5, 0.0),
            candidate("near", 0.01, 0.0),
            candidate("mid", 0.1, 0.0),
            candidate("farthest", 1.0, 0.0),
            candidate("close", 0.05, 0.0),
        ];

        let ranked = rank_nearest(origin, &candidates);
        let names: std::vec::Vec<&str> = ranked.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["near", "close", "mid"]);
        assert!(ranked[0].distance_km < ranked[1].distance_km);
        assert!(ranked[1].distance_km < ranked[2].distance_km);
        assert!(ranked.iter().all(|h| h.coordinate.is_some()));
    }

    #[test]
    fn test_fewer_than_three() {
        let origin = Coordinate::new(0.0, 0.0);
        let ranked = rank_nearest(origin, &[candidate("only", 0.2, 0.2)]);
        assert_eq!(ranked.len(), 1);
        assert!(rank_nearest(origin, &[]).is_empty());
    }

    #[test]
    fn test_ties_keep_directory_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let ranked = rank_nearest(
            origin,
            &[candidate("a", 0.1, 0.0), candidate("b", 0.1, 0.0)],
        );
        assert_eq!(ranked[0].name.as_str(), "a");
        assert_eq!(ranked[1].name.as_str(), "b");
    }

    #[test]
    fn test_non_finite_skipped() {
        let origin = Coordinate::new(0.0, 0.0);
        let ranked = rank_nearest(
            origin,
            &[candidate("bad", f64::NAN, 0.0), candidate("good", 0.1, 0.0)],
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name.as_str(), "good");
    }

    #[test]
    fn test_mock_list() {
        let mock = mock_hospitals();
        assert_eq!(mock.len(), 3);
        assert_eq!(mock[0].name.as_str(), "City General Hospital (Mock)");
        assert_eq!(mock[1].name.as_str(), "St. Mary’s Emergency (Mock)");
        assert_eq!(mock[2].distance_km, 4.1);
        assert!(mock.iter().all(|h| h.coordinate.is_none()));
    }

    #[test]
    fn test_field_truncates_on_char_boundary() {
        let long = "é".repeat(40); // 80 bytes
        let f = field(&long);
        assert_eq!(f.len(), 64);
        assert!(f.chars().all(|c| c == 'é'));
    }
}
