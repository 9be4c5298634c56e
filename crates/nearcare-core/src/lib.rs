//! Domain logic for the nearcare facility locator.
//!
//! This crate owns everything between the location providers
//! (`nearcare-locate`) and the UI surfaces (CLI / TUI):
//!
//! - **Domain model** ([`model`]) — bounds-checked [`Coordinate`],
//!   immutable [`Facility`], and distance-annotated [`RankedFacility`].
//!
//! - **[`Directory`]** — the fixed, in-memory facility list. Built once
//!   at startup (compiled-in table or validated config entries), never
//!   mutated afterwards.
//!
//! - **[`geo`]** — great-circle distance via the haversine formula.
//!
//! - **[`rank`] / [`filter`]** — pure functions: stable ascending sort
//!   by distance, and an order-preserving case-insensitive substring
//!   filter that is safe to re-run on every keystroke.
//!
//! - **[`LocatorService`]** — the one async operation: resolve the
//!   caller's position through an injected provider and rank the
//!   directory against it.
//!
//! - **[`LocatorSession`]** — the presentation-layer state machine
//!   (`Idle | Resolving | Resolved | Failed`) with generation-counted
//!   cancel-and-replace semantics for overlapping requests.

pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod geo;
pub mod locator;
pub mod model;
pub mod rank;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{LocatorSettings, ProviderSelection};
pub use directory::Directory;
pub use error::CoreError;
pub use locator::{LocatorService, Resolution};
pub use model::{Coordinate, Facility, FacilityKind, RankedFacility};
pub use session::{LocatorSession, ResolutionState};
