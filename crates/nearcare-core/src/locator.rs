// ── Locator service ──
//
// The single async operation in the system: resolve the caller's
// position through the injected provider, then rank the directory
// against it. One-shot, no retries — the caller decides when to try
// again.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use nearcare_locate::{AnyProvider, LocatePosition, LocationError};

use crate::directory::Directory;
use crate::model::{Coordinate, RankedFacility};
use crate::rank;

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub user_location: Coordinate,
    /// Directory entries sorted ascending by distance; same length as
    /// the directory, ties in directory order.
    pub ranked: Vec<RankedFacility>,
    /// Which provider produced the position.
    pub source: String,
    /// Accuracy hint, when the provider reports one.
    pub accuracy_km: Option<f64>,
    pub resolved_at: DateTime<Utc>,
}

/// Resolves a position and ranks the directory against it.
///
/// The provider is injected at construction; nothing in here branches
/// on which implementation is running.
#[derive(Debug, Clone)]
pub struct LocatorService<P = AnyProvider> {
    provider: P,
    directory: Directory,
}

impl<P: LocatePosition> LocatorService<P> {
    pub fn new(provider: P, directory: Directory) -> Self {
        Self {
            provider,
            directory,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Resolve the current position and rank the directory.
    ///
    /// Provider output is validated before use: out-of-range
    /// coordinates are a provider defect and surface as
    /// [`LocationError::Unavailable`].
    pub async fn locate(&self) -> Result<Resolution, LocationError> {
        info!(provider = self.provider.name(), "resolving current position");

        let position = self.provider.current_position().await?;

        let user_location =
            Coordinate::try_from(&position).map_err(|_| {
                warn!(
                    lat = position.lat,
                    lng = position.lng,
                    "provider returned out-of-range coordinates"
                );
                LocationError::Unavailable {
                    message: format!(
                        "provider returned out-of-range coordinates ({}, {})",
                        position.lat, position.lng
                    ),
                }
            })?;

        let ranked = rank::rank(&self.directory, user_location);
        debug!(
            facilities = ranked.len(),
            source = %position.source,
            "ranked directory by distance"
        );

        Ok(Resolution {
            user_location,
            ranked,
            source: position.source,
            accuracy_km: position.accuracy_km,
            resolved_at: Utc::now(),
        })
    }
}
