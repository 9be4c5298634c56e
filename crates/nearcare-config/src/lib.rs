//! Shared configuration for the nearcare CLI and TUI.
//!
//! TOML file + `NEARCARE_`-prefixed environment variables, merged via
//! figment. Validation happens once, here, at load time: a `Config`
//! that translated into [`LocatorSettings`] and a [`Directory`] is
//! known-good, and nothing downstream re-checks it. Invalid input
//! fails fast with a field-specific [`ConfigError::Validation`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use nearcare_core::{
    Coordinate, Directory, Facility, FacilityKind, LocatorSettings, ProviderSelection,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn validation(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Location provider selection and tuning.
    #[serde(default)]
    pub locator: LocatorTable,

    /// Map presentation defaults.
    #[serde(default)]
    pub map: MapTable,

    /// Directory override. Empty means the compiled-in directory.
    #[serde(default)]
    pub facilities: Vec<FacilityEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    nearcare_core::config::DEFAULT_TIMEOUT_SECS
}

/// `[locator]` — which provider runs and how long it gets.
#[derive(Debug, Deserialize, Serialize)]
pub struct LocatorTable {
    /// Provider kind: "ip", "fixed", or "off".
    #[serde(default = "default_provider")]
    pub provider: String,

    /// IP lookup endpoint. Only meaningful for `provider = "ip"`.
    pub endpoint: Option<String>,

    /// Position for `provider = "fixed"`.
    pub fixed_lat: Option<f64>,
    pub fixed_lng: Option<f64>,

    /// Resolution deadline in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for LocatorTable {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            fixed_lat: None,
            fixed_lng: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "ip".into()
}

/// `[map]` — initial focus and zoom for the TUI map pane.
#[derive(Debug, Deserialize, Serialize)]
pub struct MapTable {
    /// Slippy-style zoom level (1 = whole world, 15 = street scale).
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Optional focus override. Defaults to the directory centroid.
    pub focus_lat: Option<f64>,
    pub focus_lng: Option<f64>,
}

impl Default for MapTable {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            focus_lat: None,
            focus_lng: None,
        }
    }
}

fn default_zoom() -> u8 {
    11
}

/// A facility entry in the flat `[[facilities]]` schema.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FacilityEntry {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub kind: Option<String>,
    pub phone: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "nearcare", "nearcare").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("nearcare");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from an explicit file (or the canonical path)
/// plus the environment.
pub fn load_config_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("NEARCARE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load from the canonical path, falling back to defaults.
pub fn load_config_or_default() -> Config {
    load_config_from(None).unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path` (or the canonical
/// location).
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Translation into core types ─────────────────────────────────────

/// Validate and translate the `[locator]` table.
pub fn locator_settings(cfg: &Config) -> Result<LocatorSettings, ConfigError> {
    if cfg.locator.timeout_secs == 0 {
        return Err(validation("locator.timeout_secs", "must be greater than zero"));
    }
    let timeout = Duration::from_secs(cfg.locator.timeout_secs);

    let provider = match cfg.locator.provider.as_str() {
        "ip" => {
            let raw = cfg
                .locator
                .endpoint
                .as_deref()
                .unwrap_or(nearcare_core::config::DEFAULT_LOOKUP_ENDPOINT);
            let endpoint = Url::parse(raw)
                .map_err(|e| validation("locator.endpoint", format!("invalid URL: {e}")))?;
            ProviderSelection::IpLookup { endpoint }
        }
        "fixed" => {
            let (Some(lat), Some(lng)) = (cfg.locator.fixed_lat, cfg.locator.fixed_lng) else {
                return Err(validation(
                    "locator.fixed_lat/fixed_lng",
                    "required when provider = \"fixed\"",
                ));
            };
            let position = Coordinate::try_new(lat, lng).map_err(|e| {
                validation("locator.fixed_lat/fixed_lng", e.to_string())
            })?;
            ProviderSelection::Fixed { position }
        }
        "off" => ProviderSelection::Denied,
        other => {
            return Err(validation(
                "locator.provider",
                format!("unknown provider '{other}' (expected \"ip\", \"fixed\", or \"off\")"),
            ));
        }
    };

    Ok(LocatorSettings { provider, timeout })
}

/// Build the facility directory: the `[[facilities]]` entries when
/// present, the compiled-in table otherwise.
pub fn directory(cfg: &Config) -> Result<Directory, ConfigError> {
    if cfg.facilities.is_empty() {
        return Ok(Directory::builtin());
    }

    let entries: Vec<Facility> = cfg
        .facilities
        .iter()
        .map(facility_from_entry)
        .collect::<Result<_, _>>()?;

    Directory::from_entries(entries).map_err(|e| validation("facilities", e.to_string()))
}

fn facility_from_entry(entry: &FacilityEntry) -> Result<Facility, ConfigError> {
    if entry.name.trim().is_empty() {
        return Err(validation("facilities.name", "must not be empty"));
    }

    let location = Coordinate::try_new(entry.lat, entry.lng).map_err(|e| {
        validation(
            "facilities.lat/lng",
            format!("{} ('{}')", e, entry.name),
        )
    })?;

    let kind = match entry.kind.as_deref() {
        None => FacilityKind::default(),
        Some(raw) => raw.parse().map_err(|_| {
            validation(
                "facilities.kind",
                format!("unknown kind '{raw}' ('{}')", entry.name),
            )
        })?,
    };

    Ok(Facility {
        name: entry.name.clone(),
        address: entry.address.clone(),
        kind,
        phone: entry.phone.clone(),
        location,
    })
}

/// Validated map defaults for the TUI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub zoom: u8,
    /// Explicit focus, when configured. `None` means directory centroid.
    pub focus: Option<Coordinate>,
}

/// Validate and translate the `[map]` table.
pub fn map_defaults(cfg: &Config) -> Result<MapDefaults, ConfigError> {
    if !(1..=15).contains(&cfg.map.default_zoom) {
        return Err(validation("map.default_zoom", "must be between 1 and 15"));
    }

    let focus = match (cfg.map.focus_lat, cfg.map.focus_lng) {
        (None, None) => None,
        (Some(lat), Some(lng)) => Some(
            Coordinate::try_new(lat, lng)
                .map_err(|e| validation("map.focus_lat/focus_lng", e.to_string()))?,
        ),
        _ => {
            return Err(validation(
                "map.focus_lat/focus_lng",
                "both must be set together",
            ));
        }
    };

    Ok(MapDefaults {
        zoom: cfg.map.default_zoom,
        focus,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_from(toml_body: &str) -> Config {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(toml_body.as_bytes()).unwrap();
        load_config_from(Some(file.path())).unwrap()
    }

    #[test]
    fn defaults_when_file_is_missing() {
        let cfg = load_config_from(Some(Path::new("/nonexistent/nearcare.toml"))).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.locator.provider, "ip");
        assert!(cfg.facilities.is_empty());

        let settings = locator_settings(&cfg).unwrap();
        assert!(matches!(
            settings.provider,
            ProviderSelection::IpLookup { .. }
        ));
    }

    #[test]
    fn loads_fixed_provider_from_file() {
        let cfg = config_from(
            r#"
            [locator]
            provider = "fixed"
            fixed_lat = 18.5204
            fixed_lng = 73.8567
            timeout_secs = 5
            "#,
        );

        let settings = locator_settings(&cfg).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(matches!(settings.provider, ProviderSelection::Fixed { .. }));
    }

    #[test]
    fn off_provider_means_denied() {
        let cfg = config_from("[locator]\nprovider = \"off\"\n");
        let settings = locator_settings(&cfg).unwrap();
        assert_eq!(settings.provider, ProviderSelection::Denied);
    }

    #[test]
    fn rejects_unknown_provider() {
        let cfg = config_from("[locator]\nprovider = \"gps\"\n");
        let err = locator_settings(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "locator.provider"));
    }

    #[test]
    fn rejects_fixed_without_coordinates() {
        let cfg = config_from("[locator]\nprovider = \"fixed\"\n");
        assert!(locator_settings(&cfg).is_err());
    }

    #[test]
    fn rejects_out_of_range_fixed_coordinates() {
        let cfg = config_from(
            "[locator]\nprovider = \"fixed\"\nfixed_lat = 95.0\nfixed_lng = 0.0\n",
        );
        assert!(locator_settings(&cfg).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = config_from("[locator]\ntimeout_secs = 0\n");
        assert!(locator_settings(&cfg).is_err());
    }

    #[test]
    fn custom_facilities_replace_the_builtin_directory() {
        let cfg = config_from(
            r#"
            [[facilities]]
            name = "Alpha Clinic"
            address = "1 Main St"
            lat = 18.5
            lng = 73.8
            kind = "clinic"

            [[facilities]]
            name = "Beta Hospital"
            address = "2 Main St"
            lat = 18.6
            lng = 73.9
            "#,
        );

        let dir = directory(&cfg).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.get("alpha clinic").unwrap().kind, FacilityKind::Clinic);
        assert_eq!(dir.get("Beta Hospital").unwrap().kind, FacilityKind::Hospital);
    }

    #[test]
    fn rejects_duplicate_facility_names() {
        let cfg = config_from(
            r#"
            [[facilities]]
            name = "Same"
            address = "1 Main St"
            lat = 18.5
            lng = 73.8

            [[facilities]]
            name = "same"
            address = "2 Main St"
            lat = 18.6
            lng = 73.9
            "#,
        );
        let err = directory(&cfg).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn rejects_bad_facility_coordinates_and_kinds() {
        let cfg = config_from(
            "[[facilities]]\nname = \"X\"\naddress = \"Y\"\nlat = 123.0\nlng = 73.8\n",
        );
        assert!(directory(&cfg).is_err());

        let cfg = config_from(
            "[[facilities]]\nname = \"X\"\naddress = \"Y\"\nlat = 18.5\nlng = 73.8\nkind = \"spa\"\n",
        );
        assert!(directory(&cfg).is_err());
    }

    #[test]
    fn map_defaults_validate_zoom_and_focus() {
        let cfg = config_from("[map]\ndefault_zoom = 12\nfocus_lat = 18.5\nfocus_lng = 73.8\n");
        let map = map_defaults(&cfg).unwrap();
        assert_eq!(map.zoom, 12);
        assert!(map.focus.is_some());

        let cfg = config_from("[map]\ndefault_zoom = 30\n");
        assert!(map_defaults(&cfg).is_err());

        let cfg = config_from("[map]\nfocus_lat = 18.5\n");
        assert!(map_defaults(&cfg).is_err());
    }

    #[test]
    fn save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::default();
        let written = save_config(&cfg, Some(&path)).unwrap();
        assert_eq!(written, path);

        let loaded = load_config_from(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.output, cfg.defaults.output);
        assert_eq!(loaded.locator.provider, cfg.locator.provider);
    }
}
