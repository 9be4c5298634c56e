//! Location-resolution capability layer for the nearcare workspace.
//!
//! Obtaining the caller's position is the one genuinely asynchronous,
//! fallible operation in the facility locator. This crate isolates it
//! behind the [`LocatePosition`] trait with three implementations:
//!
//! - **[`IpLookupProvider`]** — approximate position from a public
//!   IP-geolocation HTTP endpoint (the "real" provider).
//! - **[`FixedProvider`]** — a position configured ahead of time.
//!   Deterministic; used for scripting and in tests.
//! - **[`DeniedProvider`]** — always fails with
//!   [`LocationError::PermissionDenied`]; selected when the operator
//!   has not granted location consent.
//!
//! Which implementation runs is decided once, from validated
//! configuration, in `nearcare-core` — never by conditionals scattered
//! through UI code. Errors carry exactly three reasons
//! (`PermissionDenied`, `Unavailable`, `Timeout`); callers own the
//! user-facing messaging.

pub mod error;
pub mod fixed;
pub mod ip_lookup;
pub mod provider;

pub use error::LocationError;
pub use fixed::{DeniedProvider, FixedProvider};
pub use ip_lookup::IpLookupProvider;
pub use provider::{AnyProvider, LocatePosition, ResolvedPosition};
