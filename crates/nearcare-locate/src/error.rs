use thiserror::Error;

/// Failure reasons for a location-resolution request.
///
/// These are the only errors a provider may produce. Resolution is a
/// single user-triggered one-shot request, so no retry machinery lives
/// here; `nearcare-core` and the binaries map these into user-facing
/// messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// Location access was withheld — consent not granted, or the
    /// lookup service refused the request.
    #[error("location permission denied")]
    PermissionDenied,

    /// The position could not be determined (service unreachable,
    /// malformed response, lookup failure).
    #[error("location unavailable: {message}")]
    Unavailable { message: String },

    /// The request did not complete within the configured deadline.
    #[error("location request timed out after {elapsed_secs}s")]
    Timeout { elapsed_secs: u64 },
}

impl LocationError {
    /// Short machine-friendly label for logs and structured output.
    pub fn reason_label(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::Unavailable { .. } => "unavailable",
            Self::Timeout { .. } => "timeout",
        }
    }

    /// Returns `true` if a manual retry might succeed without any
    /// configuration change.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}
