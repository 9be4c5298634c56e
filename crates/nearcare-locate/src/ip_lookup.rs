// ── IP-geolocation provider ──
//
// Resolves an approximate position from a public IP-geolocation
// endpoint. Responses follow the common `{status, lat, lon, message}`
// JSON shape; anything else maps to `Unavailable`.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::LocationError;
use crate::provider::{LocatePosition, ResolvedPosition};

/// Default request deadline for the lookup call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider backed by an HTTP IP-geolocation service.
///
/// City-scale accuracy at best; the `accuracy_km` hint reflects that.
/// The endpoint URL and deadline are injected — construction happens
/// in one place from validated configuration.
#[derive(Debug, Clone)]
pub struct IpLookupProvider {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

/// Response body of the lookup service.
#[derive(Debug, Deserialize)]
struct LookupBody {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Rough accuracy radius reported for IP-based positions.
const IP_ACCURACY_KM: f64 = 25.0;

impl IpLookupProvider {
    /// Build a provider with its own HTTP client honoring `timeout`.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, LocationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LocationError::Unavailable {
                message: format!("http client setup failed: {e}"),
            })?;
        Ok(Self {
            http,
            endpoint,
            timeout,
        })
    }

    /// Build a provider around an existing HTTP client (tests).
    pub fn with_client(http: reqwest::Client, endpoint: Url, timeout: Duration) -> Self {
        Self {
            http,
            endpoint,
            timeout,
        }
    }

    fn map_transport(&self, err: &reqwest::Error) -> LocationError {
        if err.is_timeout() {
            LocationError::Timeout {
                elapsed_secs: self.timeout.as_secs(),
            }
        } else {
            LocationError::Unavailable {
                message: format!("lookup request failed: {err}"),
            }
        }
    }
}

impl LocatePosition for IpLookupProvider {
    async fn current_position(&self) -> Result<ResolvedPosition, LocationError> {
        debug!(endpoint = %self.endpoint, "requesting position from IP lookup service");

        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::UNAUTHORIZED {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            return Err(LocationError::Unavailable {
                message: format!("lookup service returned HTTP {status}"),
            });
        }

        let body: LookupBody =
            response
                .json()
                .await
                .map_err(|e| LocationError::Unavailable {
                    message: format!("malformed lookup response: {e}"),
                })?;

        if body.status != "success" {
            return Err(LocationError::Unavailable {
                message: body
                    .message
                    .unwrap_or_else(|| "lookup service reported failure".into()),
            });
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocationError::Unavailable {
                message: "lookup response missing coordinates".into(),
            });
        };

        debug!(lat, lon, "IP lookup resolved a position");

        Ok(ResolvedPosition {
            lat,
            lng: lon,
            accuracy_km: Some(IP_ACCURACY_KM),
            source: self
                .endpoint
                .host_str()
                .unwrap_or("ip-lookup")
                .to_owned(),
        })
    }

    fn name(&self) -> &'static str {
        "ip-lookup"
    }
}
