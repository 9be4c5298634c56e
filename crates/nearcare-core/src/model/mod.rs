//! Canonical domain types for the facility locator.

pub mod coordinate;
pub mod facility;

pub use coordinate::Coordinate;
pub use facility::{Facility, FacilityKind, RankedFacility};
