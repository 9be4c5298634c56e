//! The facility directory — a fixed, in-memory list.
//!
//! Built once at startup and shared as cheap `Arc` clones. There is no
//! persistence and no mutation: ranking and filtering produce new
//! sequences, never touch the directory itself.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{Coordinate, Facility, FacilityKind, RankedFacility};

/// Immutable, name-keyed facility list.
#[derive(Debug, Clone)]
pub struct Directory {
    facilities: Arc<Vec<Arc<Facility>>>,
}

impl Directory {
    /// The compiled-in directory (Pune region).
    pub fn builtin() -> Self {
        let entries = builtin_entries();
        Self {
            facilities: Arc::new(entries.into_iter().map(Arc::new).collect()),
        }
    }

    /// Build a directory from externally sourced entries (config file).
    ///
    /// Rejects an empty list and duplicate names (case-insensitive) —
    /// the name is the directory key.
    pub fn from_entries(entries: Vec<Facility>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::EmptyDirectory);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(CoreError::DuplicateFacility {
                    name: entry.name.clone(),
                });
            }
        }

        Ok(Self {
            facilities: Arc::new(entries.into_iter().map(Arc::new).collect()),
        })
    }

    /// All facilities in directory order.
    pub fn facilities(&self) -> &[Arc<Facility>] {
        &self.facilities
    }

    /// Iterate facilities in directory order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Facility>> {
        self.facilities.iter()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Look up a facility by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Arc<Facility>> {
        self.facilities
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Geographic centroid of the directory — the default map focus
    /// before any resolution has happened.
    pub fn centroid(&self) -> Coordinate {
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        let n = self.facilities.len().max(1) as f64;
        let (lat_sum, lng_sum) = self.facilities.iter().fold((0.0, 0.0), |(la, ln), f| {
            (la + f.location.lat(), ln + f.location.lng())
        });
        // Averaging in-range values stays in range.
        Coordinate::try_new(lat_sum / n, lng_sum / n)
            .unwrap_or_else(|_| Coordinate::try_new(0.0, 0.0).expect("origin is valid"))
    }

    /// The directory as an unranked sequence (no distance annotation).
    pub fn unranked(&self) -> Vec<RankedFacility> {
        self.facilities
            .iter()
            .map(|f| RankedFacility::unranked(Arc::clone(f)))
            .collect()
    }
}

/// Static directory contents.
///
/// Coordinates are city-scale approximations; addresses are display
/// strings, not structured data.
#[allow(clippy::too_many_lines)]
fn builtin_entries() -> Vec<Facility> {
    let entry = |name: &str, address: &str, kind, phone: Option<&str>, lat, lng| Facility {
        name: name.to_owned(),
        address: address.to_owned(),
        kind,
        phone: phone.map(str::to_owned),
        location: Coordinate::try_new(lat, lng).expect("builtin coordinates are valid"),
    };

    vec![
        entry(
            "Ruby Hall Clinic",
            "40 Sassoon Rd, Sangamvadi, Pune 411001",
            FacilityKind::Hospital,
            Some("+91 20 6645 5100"),
            18.5314,
            73.8778,
        ),
        entry(
            "Jehangir Hospital",
            "32 Sassoon Rd, Pune 411001",
            FacilityKind::Hospital,
            Some("+91 20 6681 9999"),
            18.5289,
            73.8744,
        ),
        entry(
            "Deenanath Mangeshkar Hospital",
            "Near Mhatre Bridge, Erandwane, Pune 411004",
            FacilityKind::Hospital,
            Some("+91 20 4015 1000"),
            18.5244,
            73.8413,
        ),
        entry(
            "Sassoon General Hospital",
            "Station Rd, Agarkar Nagar, Pune 411001",
            FacilityKind::Hospital,
            None,
            18.5196,
            73.8741,
        ),
        entry(
            "Noble Hospital",
            "153 Magarpatta Rd, Hadapsar, Pune 411013",
            FacilityKind::Hospital,
            Some("+91 20 6715 9999"),
            18.5018,
            73.9263,
        ),
        entry(
            "Sahyadri Super Speciality Hospital",
            "Plot 30-C, Karve Rd, Deccan Gymkhana, Pune 411004",
            FacilityKind::Hospital,
            None,
            18.5089,
            73.8310,
        ),
        entry(
            "Loni Kalbhor Primary Health Centre",
            "Pune-Solapur Rd, Loni Kalbhor 412201",
            FacilityKind::Clinic,
            None,
            18.4556,
            74.0219,
        ),
        entry(
            "Theur Phata Rural Clinic",
            "Theur Phata, Kadam Wak Vasti 412201",
            FacilityKind::Clinic,
            None,
            18.4571,
            74.0253,
        ),
        entry(
            "Apollo Diagnostics Kothrud",
            "Paud Rd, Kothrud, Pune 411038",
            FacilityKind::Diagnostic,
            Some("+91 20 4890 6789"),
            18.5074,
            73.8077,
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn facility(name: &str, lat: f64, lng: f64) -> Facility {
        Facility {
            name: name.to_owned(),
            address: format!("{name} address"),
            kind: FacilityKind::default(),
            phone: None,
            location: Coordinate::try_new(lat, lng).unwrap(),
        }
    }

    #[test]
    fn builtin_directory_has_unique_names() {
        let dir = Directory::builtin();
        assert!(!dir.is_empty());

        let mut names = HashSet::new();
        for f in dir.iter() {
            assert!(names.insert(f.name.to_lowercase()), "duplicate: {}", f.name);
        }
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let err = Directory::from_entries(vec![
            facility("Alpha Clinic", 18.5, 73.8),
            facility("alpha clinic", 18.6, 73.9),
        ])
        .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateFacility { .. }));
    }

    #[test]
    fn from_entries_rejects_empty() {
        assert!(matches!(
            Directory::from_entries(Vec::new()),
            Err(CoreError::EmptyDirectory)
        ));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let dir = Directory::builtin();
        assert!(dir.get("ruby hall clinic").is_some());
        assert!(dir.get("No Such Place").is_none());
    }

    #[test]
    fn centroid_lies_within_the_directory_span() {
        let dir = Directory::from_entries(vec![
            facility("A", 18.0, 73.0),
            facility("B", 19.0, 75.0),
        ])
        .unwrap();
        let c = dir.centroid();
        assert!((c.lat() - 18.5).abs() < 1e-9);
        assert!((c.lng() - 74.0).abs() < 1e-9);
    }

    #[test]
    fn unranked_preserves_order_and_length() {
        let dir = Directory::builtin();
        let unranked = dir.unranked();
        assert_eq!(unranked.len(), dir.len());
        for (r, f) in unranked.iter().zip(dir.iter()) {
            assert_eq!(r.facility.name, f.name);
            assert!(r.distance_km.is_none());
        }
    }
}
