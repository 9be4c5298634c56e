// ── Coordinate domain type ──
//
// The foundation of every distance computation. Bounds are enforced at
// construction: a Coordinate in hand is always finite and in range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use nearcare_locate::ResolvedPosition;

/// A validated geographic coordinate pair (degrees).
///
/// Latitude in `-90..=90`, longitude in `-180..=180`, both finite.
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Unvalidated serde shape (`{ "lat": .., "lng": .. }`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Construct a coordinate, rejecting out-of-range or non-finite
    /// values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let in_range = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if in_range {
            Ok(Self { lat, lng })
        } else {
            Err(CoreError::InvalidCoordinate { lat, lng })
        }
    }

    /// Latitude in degrees.
    pub fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Parse `"lat,lng"` (e.g. `"18.5204,73.8567"`).
impl FromStr for Coordinate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CoreError::CoordinateParse { input: s.to_owned() };

        let (lat_str, lng_str) = s.split_once(',').ok_or_else(parse_err)?;
        let lat: f64 = lat_str.trim().parse().map_err(|_| parse_err())?;
        let lng: f64 = lng_str.trim().parse().map_err(|_| parse_err())?;
        Self::try_new(lat, lng)
    }
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::try_new(raw.lat, raw.lng)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat,
            lng: c.lng,
        }
    }
}

/// Provider output is unvalidated; this is where it becomes a domain
/// coordinate or gets rejected.
impl TryFrom<&ResolvedPosition> for Coordinate {
    type Error = CoreError;

    fn try_from(pos: &ResolvedPosition) -> Result<Self, Self::Error> {
        Self::try_new(pos.lat, pos.lng)
    }
}
