use thiserror::Error;

use nearcare_locate::LocationError;

/// Top-level error type for the `nearcare-core` crate.
///
/// The distance calculator and search filter are total functions, so
/// the failure surface is small: coordinate validation, directory
/// construction, and location resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Latitude or longitude outside geographic bounds (or not finite).
    #[error("coordinate out of range: ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// A textual coordinate did not parse as `lat,lng`.
    #[error("invalid coordinate '{input}': expected 'lat,lng'")]
    CoordinateParse { input: String },

    /// Two directory entries share a name. Names are the directory key.
    #[error("duplicate facility name '{name}' in directory")]
    DuplicateFacility { name: String },

    /// A directory must contain at least one facility.
    #[error("facility directory is empty")]
    EmptyDirectory,

    /// Lookup by name found nothing.
    #[error("no facility named '{name}'")]
    UnknownFacility { name: String },

    /// Location resolution failed.
    #[error(transparent)]
    Location(#[from] LocationError),
}
