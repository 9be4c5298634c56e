//! Great-circle distance via the haversine formula.

use crate::model::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance between two coordinates in kilometers.
///
/// Pure and total: any two valid coordinates produce a finite,
/// non-negative result. Symmetric, and zero for identical inputs.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat().to_radians();
    let lat_b = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::try_new(lat, lng).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let a = coord(18.4556, 74.0219);
        assert!(distance_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coord(18.4556, 74.0219);
        let b = coord(18.5244, 73.8413);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn known_reference_distances() {
        // Neighbouring facilities ~0.4 km apart.
        let a = coord(18.4556, 74.0219);
        let b = coord(18.4571, 74.0253);
        let d = distance_km(a, b);
        assert!((0.35..=0.45).contains(&d), "expected ~0.4 km, got {d}");

        // Across town: ~20.5 km.
        let c = coord(18.5244, 73.8413);
        let d = distance_km(a, c);
        assert!((19.5..=21.5).contains(&d), "expected ~20.5 km, got {d}");
    }

    #[test]
    fn long_haul_sanity() {
        // Pune to Mumbai is roughly 120 km as the crow flies.
        let pune = coord(18.5204, 73.8567);
        let mumbai = coord(19.0760, 72.8777);
        let d = distance_km(pune, mumbai);
        assert!((115.0..=125.0).contains(&d), "expected ~120 km, got {d}");
    }

    #[test]
    fn antipodal_points_are_finite() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 180.0);
        let d = distance_km(a, b);
        assert!(d.is_finite());
        // Half the Earth's circumference.
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1.0);
    }
}
