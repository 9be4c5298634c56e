// ── Facility domain types ──

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::coordinate::Coordinate;

/// Broad category of a facility, used for display and filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FacilityKind {
    #[default]
    Hospital,
    Clinic,
    Diagnostic,
    Pharmacy,
}

/// A single directory entry.
///
/// Created once at process start (compiled-in table or config file)
/// and never mutated afterwards. `name` is unique within a directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub kind: FacilityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub location: Coordinate,
}

/// A facility annotated with the distance from a resolved position.
///
/// `distance_km` is present only after a successful resolution and is
/// recomputed wholesale on each one — never incrementally updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    #[serde(flatten)]
    pub facility: Arc<Facility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl RankedFacility {
    /// Wrap a facility with no distance annotation.
    pub fn unranked(facility: Arc<Facility>) -> Self {
        Self {
            facility,
            distance_km: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(FacilityKind::from_str("clinic").unwrap(), FacilityKind::Clinic);
        assert_eq!(FacilityKind::from_str("Hospital").unwrap(), FacilityKind::Hospital);
        assert!(FacilityKind::from_str("spa").is_err());
    }

    #[test]
    fn kind_defaults_to_hospital_when_absent() {
        let f: Facility = serde_json::from_str(
            r#"{"name":"X","address":"Y","location":{"lat":18.5,"lng":73.8}}"#,
        )
        .unwrap();
        assert_eq!(f.kind, FacilityKind::Hospital);
        assert!(f.phone.is_none());
    }
}
