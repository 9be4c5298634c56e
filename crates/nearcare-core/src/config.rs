// ── Locator settings ──
//
// The validated, typed settings consumed by both binaries.
// `nearcare-config` translates the raw TOML/env surface into this;
// provider construction happens here, in exactly one place.

use std::time::Duration;

use url::Url;

use nearcare_locate::{AnyProvider, DeniedProvider, FixedProvider, IpLookupProvider, LocationError};

use crate::model::Coordinate;

/// Default IP-geolocation endpoint.
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "http://ip-api.com/json/";

/// Default resolution deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which location provider to run.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSelection {
    /// Remote IP-geolocation lookup against `endpoint`.
    IpLookup { endpoint: Url },
    /// A position supplied ahead of time (already bounds-checked).
    Fixed { position: Coordinate },
    /// Location consent withheld — every request is denied.
    Denied,
}

/// Validated locator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorSettings {
    pub provider: ProviderSelection,
    pub timeout: Duration,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            provider: ProviderSelection::IpLookup {
                endpoint: Url::parse(DEFAULT_LOOKUP_ENDPOINT)
                    .expect("default endpoint is a valid URL"),
            },
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LocatorSettings {
    /// Construct the configured provider.
    pub fn build_provider(&self) -> Result<AnyProvider, LocationError> {
        match &self.provider {
            ProviderSelection::IpLookup { endpoint } => {
                Ok(IpLookupProvider::new(endpoint.clone(), self.timeout)?.into())
            }
            ProviderSelection::Fixed { position } => {
                Ok(FixedProvider::new(position.lat(), position.lng()).into())
            }
            ProviderSelection::Denied => Ok(DeniedProvider.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nearcare_locate::LocatePosition;

    #[test]
    fn default_settings_use_the_ip_provider() {
        let settings = LocatorSettings::default();
        let provider = settings.build_provider().unwrap();
        assert_eq!(provider.name(), "ip-lookup");
    }

    #[test]
    fn fixed_selection_builds_a_fixed_provider() {
        let settings = LocatorSettings {
            provider: ProviderSelection::Fixed {
                position: Coordinate::try_new(18.52, 73.85).unwrap(),
            },
            timeout: Duration::from_secs(5),
        };
        assert_eq!(settings.build_provider().unwrap().name(), "fixed");
    }

    #[test]
    fn denied_selection_builds_a_denied_provider() {
        let settings = LocatorSettings {
            provider: ProviderSelection::Denied,
            timeout: Duration::from_secs(5),
        };
        assert_eq!(settings.build_provider().unwrap().name(), "denied");
    }
}
