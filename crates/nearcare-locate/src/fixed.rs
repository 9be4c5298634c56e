// ── Fixed and denied providers ──

use crate::error::LocationError;
use crate::provider::{LocatePosition, ResolvedPosition};

/// Provider that returns a position configured ahead of time.
///
/// The deterministic implementation of the capability: scripting
/// (`provider = "fixed"` in config) and tests both use it. No bounds
/// checking happens here — the raw values flow through and
/// `nearcare-core` validates them like any other provider output.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedProvider {
    lat: f64,
    lng: f64,
}

impl FixedProvider {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl LocatePosition for FixedProvider {
    async fn current_position(&self) -> Result<ResolvedPosition, LocationError> {
        Ok(ResolvedPosition {
            lat: self.lat,
            lng: self.lng,
            accuracy_km: None,
            source: "fixed".into(),
        })
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Provider selected when location consent has not been granted.
///
/// Every request fails with [`LocationError::PermissionDenied`], so
/// the "consent withheld" path exercises the same error handling as a
/// platform denial would.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeniedProvider;

impl LocatePosition for DeniedProvider {
    async fn current_position(&self) -> Result<ResolvedPosition, LocationError> {
        Err(LocationError::PermissionDenied)
    }

    fn name(&self) -> &'static str {
        "denied"
    }
}
