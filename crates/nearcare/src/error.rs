//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use nearcare_core::CoreError;
use nearcare_locate::LocationError;

/// Exit codes for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const PERMISSION: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNAVAILABLE: i32 = 5;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Location resolution ──────────────────────────────────────────

    #[error("Location permission denied")]
    #[diagnostic(
        code(nearcare::location_denied),
        help(
            "The configured provider refused to resolve a position.\n\
             Set locator.provider = \"ip\" or \"fixed\" in your config,\n\
             or pass explicit coordinates: nearcare nearest --lat LAT --lng LNG"
        )
    )]
    LocationDenied,

    #[error("Location unavailable: {message}")]
    #[diagnostic(
        code(nearcare::location_unavailable),
        help("The lookup service could not determine a position. Retry, or pass --lat/--lng.")
    )]
    LocationUnavailable { message: String },

    #[error("Location request timed out after {seconds}s")]
    #[diagnostic(
        code(nearcare::location_timeout),
        help("Increase the deadline with --timeout or locator.timeout_secs in your config.")
    )]
    LocationTimeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────

    #[error("No facility named '{name}'")]
    #[diagnostic(
        code(nearcare::not_found),
        help("Run: nearcare facilities list to see the directory")
    )]
    FacilityNotFound { name: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nearcare::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(nearcare::config),
        help("Inspect the file with: nearcare config show\nRecreate it with: nearcare config init --force")
    )]
    Config(#[from] nearcare_config::ConfigError),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(nearcare::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::LocationDenied => exit_code::PERMISSION,
            Self::LocationUnavailable { .. } => exit_code::UNAVAILABLE,
            Self::LocationTimeout { .. } => exit_code::TIMEOUT,
            Self::FacilityNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } => exit_code::USAGE,
            Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── Error mappings ───────────────────────────────────────────────────

impl From<LocationError> for CliError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::PermissionDenied => Self::LocationDenied,
            LocationError::Unavailable { message } => Self::LocationUnavailable { message },
            LocationError::Timeout { elapsed_secs } => Self::LocationTimeout {
                seconds: elapsed_secs,
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Location(e) => e.into(),

            CoreError::UnknownFacility { name } => Self::FacilityNotFound { name },

            CoreError::InvalidCoordinate { lat, lng } => Self::Validation {
                field: "coordinate".into(),
                reason: format!("({lat}, {lng}) is out of range"),
            },

            CoreError::CoordinateParse { input } => Self::Validation {
                field: "coordinate".into(),
                reason: format!("'{input}' is not a 'lat,lng' pair"),
            },

            CoreError::DuplicateFacility { name } => Self::Validation {
                field: "facilities".into(),
                reason: format!("duplicate name '{name}'"),
            },

            CoreError::EmptyDirectory => Self::Validation {
                field: "facilities".into(),
                reason: "directory is empty".into(),
            },
        }
    }
}
