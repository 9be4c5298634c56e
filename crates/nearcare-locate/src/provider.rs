// ── Provider abstraction ──
//
// One trait, three implementations. Selection happens once, from
// validated configuration; consumers hold a concrete `AnyProvider`
// (or a generic parameter in tests) and never branch on the kind.

use crate::error::LocationError;
use crate::fixed::{DeniedProvider, FixedProvider};
use crate::ip_lookup::IpLookupProvider;

/// A resolved position as reported by a provider.
///
/// Wire-level type: coordinates are raw floats straight from the
/// provider. `nearcare-core` converts this into its bounds-checked
/// domain `Coordinate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPosition {
    pub lat: f64,
    pub lng: f64,
    /// Estimated accuracy radius, when the provider reports one.
    /// IP-based lookups are city-scale at best.
    pub accuracy_km: Option<f64>,
    /// Which provider produced this position (for logs and display).
    pub source: String,
}

/// The platform "geolocation capability": one async, fallible request
/// for the caller's current position.
#[allow(async_fn_in_trait)]
pub trait LocatePosition {
    /// Resolve the caller's current position. One-shot; no retries.
    async fn current_position(&self) -> Result<ResolvedPosition, LocationError>;

    /// Short provider name for logs and diagnostics.
    fn name(&self) -> &'static str;
}

/// Concrete provider selected from configuration.
///
/// Enum dispatch keeps the provider cheaply cloneable and spawnable
/// without trait objects; both binaries hold this type.
#[derive(Debug, Clone)]
pub enum AnyProvider {
    IpLookup(IpLookupProvider),
    Fixed(FixedProvider),
    Denied(DeniedProvider),
}

impl LocatePosition for AnyProvider {
    async fn current_position(&self) -> Result<ResolvedPosition, LocationError> {
        match self {
            Self::IpLookup(p) => p.current_position().await,
            Self::Fixed(p) => p.current_position().await,
            Self::Denied(p) => p.current_position().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::IpLookup(p) => p.name(),
            Self::Fixed(p) => p.name(),
            Self::Denied(p) => p.name(),
        }
    }
}

impl From<IpLookupProvider> for AnyProvider {
    fn from(p: IpLookupProvider) -> Self {
        Self::IpLookup(p)
    }
}

impl From<FixedProvider> for AnyProvider {
    fn from(p: FixedProvider) -> Self {
        Self::Fixed(p)
    }
}

impl From<DeniedProvider> for AnyProvider {
    fn from(p: DeniedProvider) -> Self {
        Self::Denied(p)
    }
}
