//! All possible UI actions. Actions are the sole mechanism for state
//! mutation.

use nearcare_core::{Coordinate, RankedFacility, Resolution};
use nearcare_locate::LocationError;

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Read-only snapshot of the locator session, pushed to screens after
/// every session mutation. Screens render from this and never touch
/// the session directly.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// The filtered, possibly ranked sequence to display.
    pub displayed: Vec<RankedFacility>,
    /// Current map focus.
    pub focus: Coordinate,
    /// Resolved user position, when the last request succeeded.
    pub user_location: Option<Coordinate>,
    /// A resolution request is outstanding.
    pub is_resolving: bool,
    /// Current search term (may be empty).
    pub search_term: String,
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Location resolution ───────────────────────────────────────
    /// "Use my location" — starts (or restarts) a resolve request.
    RequestLocate,
    /// Completion of the request tagged with `generation`. Stale
    /// generations are discarded by the session.
    LocateFinished {
        generation: u64,
        result: Box<Result<Resolution, LocationError>>,
    },

    // ── Session-derived data ──────────────────────────────────────
    SessionUpdated(SessionView),

    // ── List interaction ──────────────────────────────────────────
    /// Select an entry of the displayed list (refocuses the map).
    SelectFacility(usize),

    // ── Search ────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Map ───────────────────────────────────────────────────────
    MapZoomIn,
    MapZoomOut,
    MapPan(i16, i16),
    MapRecenter,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
