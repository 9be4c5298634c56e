//! Distance formatting for table cells and detail strips.

/// Human-friendly distance: metres below 1 km, one decimal below
/// 10 km, whole kilometres above.
pub fn fmt_km(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else if km < 10.0 {
        format!("{km:.1} km")
    } else {
        format!("{km:.0} km")
    }
}

/// `"─"` placeholder when no distance is known (nothing resolved yet).
pub fn fmt_opt_km(km: Option<f64>) -> String {
    km.map_or_else(|| "─".into(), fmt_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_with_magnitude() {
        assert_eq!(fmt_km(0.0), "0 m");
        assert_eq!(fmt_km(0.42), "420 m");
        assert_eq!(fmt_km(2.345), "2.3 km");
        assert_eq!(fmt_km(18.7), "19 km");
    }

    #[test]
    fn absent_distance_renders_a_placeholder() {
        assert_eq!(fmt_opt_km(None), "─");
        assert_eq!(fmt_opt_km(Some(1.5)), "1.5 km");
    }
}
