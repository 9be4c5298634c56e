// ── Locator session state machine ──
//
// Single owner of the presentation-layer state. Instead of a pile of
// independent booleans, the resolution lifecycle is one tagged variant
// (`Idle | Resolving | Resolved | Failed`) — resolving-and-failed at
// the same time cannot be represented.
//
// Overlapping requests use cancel-and-replace: `begin_resolve` bumps a
// generation counter, and `complete_resolve` ignores any completion
// carrying an older generation. A result arriving after the session is
// gone simply never finds a live generation to match.

use std::sync::Arc;

use tracing::debug;

use nearcare_locate::LocationError;

use crate::directory::Directory;
use crate::filter;
use crate::locator::Resolution;
use crate::model::{Coordinate, Facility, RankedFacility};

/// Lifecycle of the one-shot location request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionState {
    /// No request made (or the last failure was dismissed).
    Idle,
    /// A request with this generation is outstanding.
    Resolving { generation: u64 },
    /// The last request succeeded; the ranking lives here.
    Resolved {
        generation: u64,
        resolution: Resolution,
    },
    /// The last request failed; a fresh retry is allowed.
    Failed {
        generation: u64,
        error: LocationError,
    },
}

/// Presentation-layer state for the facility locator.
///
/// Owns the search term, the map focus, and the resolution lifecycle.
/// Ranking and filtering never mutate the directory; the displayed
/// sequence is derived on demand.
#[derive(Debug, Clone)]
pub struct LocatorSession {
    directory: Directory,
    state: ResolutionState,
    search_term: String,
    focus: Coordinate,
    generation: u64,
}

impl LocatorSession {
    /// Start a session focused on the directory centroid.
    pub fn new(directory: Directory) -> Self {
        let focus = directory.centroid();
        Self::with_focus(directory, focus)
    }

    /// Start a session with an explicit initial focus (config override).
    pub fn with_focus(directory: Directory, focus: Coordinate) -> Self {
        Self {
            directory,
            state: ResolutionState::Idle,
            search_term: String::new(),
            focus,
            generation: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self.state, ResolutionState::Resolving { .. })
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Where the map should be centered right now.
    pub fn focus(&self) -> Coordinate {
        self.focus
    }

    /// The resolved user position, if the last request succeeded.
    pub fn user_location(&self) -> Option<Coordinate> {
        match &self.state {
            ResolutionState::Resolved { resolution, .. } => Some(resolution.user_location),
            _ => None,
        }
    }

    /// The error from the last request, if it failed.
    pub fn last_error(&self) -> Option<&LocationError> {
        match &self.state {
            ResolutionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The full facility sequence: ranked after a successful
    /// resolution, directory order otherwise. Always exactly one entry
    /// per directory entry.
    pub fn facilities(&self) -> Vec<RankedFacility> {
        match &self.state {
            ResolutionState::Resolved { resolution, .. } => resolution.ranked.clone(),
            _ => self.directory.unranked(),
        }
    }

    /// The sequence to display: the search filter applied on top of
    /// [`facilities`](Self::facilities). Filtering never re-sorts and
    /// never touches the underlying state.
    pub fn displayed(&self) -> Vec<RankedFacility> {
        filter::apply(&self.facilities(), &self.search_term)
    }

    // ── Transitions ──────────────────────────────────────────────

    /// Start (or restart) a resolution request. Returns the new
    /// generation; the caller tags the eventual completion with it.
    ///
    /// Calling this while a request is outstanding is
    /// cancel-and-replace: the old request's completion becomes stale.
    pub fn begin_resolve(&mut self) -> u64 {
        self.generation += 1;
        self.state = ResolutionState::Resolving {
            generation: self.generation,
        };
        debug!(generation = self.generation, "resolution started");
        self.generation
    }

    /// Apply the outcome of the request tagged `generation`.
    ///
    /// Returns `false` (and changes nothing) if the generation is
    /// stale — a newer request replaced it, or the session never
    /// issued it.
    pub fn complete_resolve(
        &mut self,
        generation: u64,
        result: Result<Resolution, LocationError>,
    ) -> bool {
        let current = matches!(
            self.state,
            ResolutionState::Resolving { generation: g } if g == generation
        );
        if !current {
            debug!(generation, "discarding stale resolution result");
            return false;
        }

        match result {
            Ok(resolution) => {
                self.focus = resolution.user_location;
                self.state = ResolutionState::Resolved {
                    generation,
                    resolution,
                };
            }
            Err(error) => {
                self.state = ResolutionState::Failed { generation, error };
            }
        }
        true
    }

    /// Update the search term. Display-only; the underlying sequence
    /// and the map focus are untouched.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Select an entry of the currently displayed sequence, refocusing
    /// the map on it. The facility sequence and the search term are
    /// untouched.
    pub fn select(&mut self, displayed_index: usize) -> Option<Arc<Facility>> {
        let selected = self.displayed().get(displayed_index).map(|r| Arc::clone(&r.facility))?;
        self.focus = selected.location;
        Some(selected)
    }

    /// Dismiss a surfaced failure, returning to `Idle`.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, ResolutionState::Failed { .. }) {
            self.state = ResolutionState::Idle;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::locator::LocatorService;
    use crate::model::FacilityKind;
    use nearcare_locate::FixedProvider;
    use pretty_assertions::assert_eq;

    fn scenario_directory() -> Directory {
        let entry = |name: &str, lat, lng| Facility {
            name: name.to_owned(),
            address: format!("{name} address"),
            kind: FacilityKind::default(),
            phone: None,
            location: Coordinate::try_new(lat, lng).unwrap(),
        };
        Directory::from_entries(vec![
            entry("C", 18.5244, 73.8413),
            entry("A", 18.4556, 74.0219),
            entry("B", 18.4571, 74.0253),
        ])
        .unwrap()
    }

    async fn resolve_at(directory: &Directory, lat: f64, lng: f64) -> Resolution {
        LocatorService::new(FixedProvider::new(lat, lng), directory.clone())
            .locate()
            .await
            .unwrap()
    }

    #[test]
    fn starts_idle_focused_on_centroid() {
        let dir = scenario_directory();
        let session = LocatorSession::new(dir.clone());

        assert_eq!(*session.state(), ResolutionState::Idle);
        assert!(!session.is_resolving());
        assert_eq!(session.focus(), dir.centroid());

        // Unranked, directory order.
        let names: Vec<String> = session
            .facilities()
            .iter()
            .map(|r| r.facility.name.clone())
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert!(session.facilities().iter().all(|r| r.distance_km.is_none()));
    }

    #[tokio::test]
    async fn successful_resolve_ranks_and_refocuses() {
        let dir = scenario_directory();
        let mut session = LocatorSession::new(dir.clone());
        let resolution = resolve_at(&dir, 18.4556, 74.0219).await;

        let generation = session.begin_resolve();
        assert!(session.is_resolving());

        assert!(session.complete_resolve(generation, Ok(resolution)));

        let names: Vec<String> = session
            .facilities()
            .iter()
            .map(|r| r.facility.name.clone())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(session.facilities().len(), dir.len());
        assert_eq!(
            session.focus(),
            Coordinate::try_new(18.4556, 74.0219).unwrap()
        );
        assert!(session.user_location().is_some());
    }

    #[test]
    fn failed_resolve_keeps_directory_order_and_allows_retry() {
        let mut session = LocatorSession::new(scenario_directory());

        let generation = session.begin_resolve();
        assert!(session.complete_resolve(generation, Err(LocationError::PermissionDenied)));

        assert!(!session.is_resolving());
        assert_eq!(session.last_error(), Some(&LocationError::PermissionDenied));
        assert!(session.facilities().iter().all(|r| r.distance_km.is_none()));

        session.dismiss_error();
        assert_eq!(*session.state(), ResolutionState::Idle);

        // A fresh request is allowed after a failure.
        let next = session.begin_resolve();
        assert!(next > generation);
    }

    #[tokio::test]
    async fn stale_generation_is_discarded() {
        let dir = scenario_directory();
        let mut session = LocatorSession::new(dir.clone());
        let resolution = resolve_at(&dir, 18.4556, 74.0219).await;

        let first = session.begin_resolve();
        // Second press while the first is outstanding: cancel-and-replace.
        let second = session.begin_resolve();
        assert!(second > first);

        // The first request's completion arrives late — dropped wholesale.
        assert!(!session.complete_resolve(first, Ok(resolution.clone())));
        assert!(session.is_resolving());
        assert!(session.facilities().iter().all(|r| r.distance_km.is_none()));

        // The replacement completes normally.
        assert!(session.complete_resolve(second, Ok(resolution)));
        assert!(session.user_location().is_some());
    }

    #[tokio::test]
    async fn search_filters_display_without_mutating_state() {
        let dir = scenario_directory();
        let mut session = LocatorSession::new(dir.clone());
        let resolution = resolve_at(&dir, 18.4556, 74.0219).await;
        let generation = session.begin_resolve();
        session.complete_resolve(generation, Ok(resolution));

        session.set_search("B address");
        let displayed = session.displayed();
        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].facility.name, "B");

        // Underlying sequence untouched: still the full ranking.
        assert_eq!(session.facilities().len(), 3);

        session.set_search("no such facility");
        assert!(session.displayed().is_empty());
        assert_eq!(session.facilities().len(), 3);
    }

    #[test]
    fn select_refocuses_without_changing_list_or_search() {
        let mut session = LocatorSession::new(scenario_directory());
        session.set_search("a");

        let before = session.displayed();
        let picked = session.select(0).unwrap();

        assert_eq!(session.focus(), picked.location);
        assert_eq!(session.search_term(), "a");
        assert_eq!(session.displayed(), before);

        // Out-of-range selection is a no-op.
        assert!(session.select(99).is_none());
    }
}
