//! Clinic-night palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const TEAL: Color = Color::Rgb(64, 224, 208); // #40e0d0
pub const SKY_BLUE: Color = Color::Rgb(110, 180, 255); // #6eb4ff
pub const SOFT_GREEN: Color = Color::Rgb(120, 220, 130); // #78dc82
pub const AMBER: Color = Color::Rgb(255, 196, 84); // #ffc454
pub const ALERT_RED: Color = Color::Rgb(255, 107, 107); // #ff6b6b
pub const ORCHID: Color = Color::Rgb(218, 130, 217); // #da82d9

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(198, 203, 214); // #c6cbd6
pub const BORDER_GRAY: Color = Color::Rgb(92, 104, 132); // #5c6884
pub const BG_HIGHLIGHT: Color = Color::Rgb(36, 41, 54); // #242936

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(SKY_BLUE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(TEAL)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(SKY_BLUE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default().fg(SKY_BLUE).add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

/// Facility marker on the map.
pub fn map_marker() -> Style {
    Style::default().fg(AMBER)
}

/// The focused facility marker on the map.
pub fn map_marker_focused() -> Style {
    Style::default().fg(SKY_BLUE).add_modifier(Modifier::BOLD)
}

/// The resolved user position marker on the map.
pub fn map_user_marker() -> Style {
    Style::default().fg(SOFT_GREEN).add_modifier(Modifier::BOLD)
}
