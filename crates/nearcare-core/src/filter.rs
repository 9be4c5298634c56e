//! Display-only search filtering.
//!
//! Recomputed on every keystroke, so this must stay pure and cheap:
//! no state, no re-sorting, just a substring scan over `Arc` clones.

use crate::model::{Facility, RankedFacility};

/// `true` if the facility's name or address contains `needle`
/// (already lowercased).
fn matches(facility: &Facility, needle: &str) -> bool {
    facility.name.to_lowercase().contains(needle)
        || facility.address.to_lowercase().contains(needle)
}

/// Narrow a sequence by case-insensitive substring match on name or
/// address.
///
/// The empty (or whitespace-only) term is the identity. Relative
/// order of the input is preserved — ranking is someone else's job.
pub fn apply(facilities: &[RankedFacility], term: &str) -> Vec<RankedFacility> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return facilities.to_vec();
    }

    facilities
        .iter()
        .filter(|r| matches(&r.facility, &needle))
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, FacilityKind};
    use std::sync::Arc;

    fn ranked(name: &str, address: &str) -> RankedFacility {
        RankedFacility::unranked(Arc::new(Facility {
            name: name.to_owned(),
            address: address.to_owned(),
            kind: FacilityKind::default(),
            phone: None,
            location: Coordinate::try_new(18.5, 73.8).unwrap(),
        }))
    }

    fn sample() -> Vec<RankedFacility> {
        vec![
            ranked("Ruby Hall Clinic", "40 Sassoon Rd, Pune"),
            ranked("Jehangir Hospital", "32 Sassoon Rd, Pune"),
            ranked("Noble Hospital", "Magarpatta Rd, Hadapsar"),
        ]
    }

    #[test]
    fn empty_term_is_identity() {
        let input = sample();
        assert_eq!(apply(&input, ""), input);
        assert_eq!(apply(&input, "   "), input);
    }

    #[test]
    fn matches_name_case_insensitively() {
        let out = apply(&sample(), "ruby");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].facility.name, "Ruby Hall Clinic");
    }

    #[test]
    fn matches_address_and_preserves_order() {
        let out = apply(&sample(), "sassoon");
        let names: Vec<&str> = out.iter().map(|r| r.facility.name.as_str()).collect();
        assert_eq!(names, ["Ruby Hall Clinic", "Jehangir Hospital"]);
    }

    #[test]
    fn is_idempotent() {
        let input = sample();
        let once = apply(&input, "hospital");
        let twice = apply(&once, "hospital");
        assert_eq!(once, twice);
    }

    #[test]
    fn no_match_yields_empty_without_touching_input() {
        let input = sample();
        let out = apply(&input, "zzz-no-such-place");
        assert!(out.is_empty());
        assert_eq!(input.len(), 3);
    }
}
