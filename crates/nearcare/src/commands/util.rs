//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

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

/// Stderr spinner for the resolution wait. `None` when quiet or not
/// attached to a terminal, so scripted runs stay clean.
pub fn spinner(message: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new_spinner().with_message(message.to_owned());
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_distances_by_magnitude() {
        assert_eq!(fmt_km(0.0), "0 m");
        assert_eq!(fmt_km(0.3955), "396 m");
        assert_eq!(fmt_km(1.23), "1.2 km");
        assert_eq!(fmt_km(9.99), "10.0 km");
        assert_eq!(fmt_km(20.52), "21 km");
    }
}
