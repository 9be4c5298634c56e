//! Distance ranking of the directory against a resolved position.

use std::sync::Arc;

use crate::directory::Directory;
use crate::geo;
use crate::model::{Coordinate, RankedFacility};

/// Annotate every directory entry with its distance from `user` and
/// sort ascending.
///
/// The sort is stable, so equidistant facilities keep their directory
/// order. The result always has exactly one entry per directory entry.
pub fn rank(directory: &Directory, user: Coordinate) -> Vec<RankedFacility> {
    let mut ranked: Vec<RankedFacility> = directory
        .iter()
        .map(|f| RankedFacility {
            facility: Arc::clone(f),
            distance_km: Some(geo::distance_km(user, f.location)),
        })
        .collect();

    ranked.sort_by(|a, b| {
        let da = a.distance_km.unwrap_or(f64::INFINITY);
        let db = b.distance_km.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });

    ranked
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Facility, FacilityKind};

    fn directory(entries: &[(&str, f64, f64)]) -> Directory {
        Directory::from_entries(
            entries
                .iter()
                .map(|(name, lat, lng)| Facility {
                    name: (*name).to_owned(),
                    address: format!("{name} address"),
                    kind: FacilityKind::default(),
                    phone: None,
                    location: Coordinate::try_new(*lat, *lng).unwrap(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn ranks_ascending_from_user_position() {
        // Directory order deliberately not distance order.
        let dir = directory(&[
            ("C", 18.5244, 73.8413),
            ("A", 18.4556, 74.0219),
            ("B", 18.4571, 74.0253),
        ]);
        let user = Coordinate::try_new(18.4556, 74.0219).unwrap();

        let ranked = rank(&dir, user);

        assert_eq!(ranked.len(), dir.len());
        let names: Vec<&str> = ranked.iter().map(|r| r.facility.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);

        assert!(ranked[0].distance_km.unwrap() < 1e-9);
        let b = ranked[1].distance_km.unwrap();
        assert!((0.35..=0.45).contains(&b), "expected ~0.4 km, got {b}");
        let c = ranked[2].distance_km.unwrap();
        assert!((19.5..=21.5).contains(&c), "expected ~20.5 km, got {c}");
    }

    #[test]
    fn result_is_sorted_and_complete() {
        let dir = directory(&[
            ("One", 18.50, 73.85),
            ("Two", 18.52, 73.87),
            ("Three", 18.45, 74.02),
            ("Four", 18.53, 73.84),
        ]);
        let user = Coordinate::try_new(18.60, 73.70).unwrap();

        let ranked = rank(&dir, user);

        assert_eq!(ranked.len(), 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance_km.unwrap() <= pair[1].distance_km.unwrap());
        }
    }

    #[test]
    fn ties_keep_directory_order() {
        // Two entries at the same location: stable sort keeps Zeta
        // before Alpha because Zeta comes first in the directory.
        let dir = directory(&[
            ("Zeta", 18.50, 73.85),
            ("Alpha", 18.50, 73.85),
            ("Far", 19.00, 74.50),
        ]);
        let user = Coordinate::try_new(18.50, 73.85).unwrap();

        let ranked = rank(&dir, user);

        let names: Vec<&str> = ranked.iter().map(|r| r.facility.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Far"]);
    }
}
