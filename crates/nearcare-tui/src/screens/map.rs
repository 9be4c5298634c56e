//! Map screen — facility markers on a coordinate-plane canvas.
//!
//! Not a tile map: the canvas plots raw lat/lng with bounds derived
//! from the focus coordinate and a slippy-style zoom level. Focus
//! follows the session (selection, resolution); pan and zoom are
//! screen-local.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::Canvas;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use nearcare_config::MapDefaults;
use nearcare_core::Coordinate;

use crate::action::{Action, SessionView};
use crate::component::Component;
use crate::theme;
use crate::widgets::distance_fmt;

/// Zoom bounds (slippy-style: world at 1, street scale at 15).
const MIN_ZOOM: u8 = 1;
const MAX_ZOOM: u8 = 15;

/// Zoom applied after a successful resolution.
const RESOLVED_ZOOM: u8 = 13;

/// Pan step as a fraction of the visible span.
const PAN_STEP: f64 = 0.15;

pub struct MapScreen {
    focused: bool,
    #[allow(dead_code)]
    action_tx: Option<UnboundedSender<Action>>,
    view: Option<SessionView>,
    zoom: u8,
    /// Screen-local pan offset in degrees, cleared on refocus.
    pan_lat: f64,
    pan_lng: f64,
    /// Detects focus changes and the unresolved-to-resolved edge.
    last_focus: Option<Coordinate>,
    was_resolved: bool,
}

impl MapScreen {
    pub fn new(defaults: MapDefaults) -> Self {
        Self {
            focused: false,
            action_tx: None,
            view: None,
            zoom: defaults.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            pan_lat: 0.0,
            pan_lng: 0.0,
            last_focus: None,
            was_resolved: false,
        }
    }

    /// Visible longitude span in degrees at the current zoom.
    fn span_lng(&self) -> f64 {
        360.0 / f64::from(1u32 << u32::from(self.zoom))
    }

    fn apply_view(&mut self, view: &SessionView) {
        // Refocusing (selection or resolution) clears the manual pan.
        if self.last_focus != Some(view.focus) {
            self.pan_lat = 0.0;
            self.pan_lng = 0.0;
            self.last_focus = Some(view.focus);
        }

        // Tighter zoom the first time a position resolves.
        let resolved = view.user_location.is_some();
        if resolved && !self.was_resolved {
            self.zoom = self.zoom.max(RESOLVED_ZOOM);
        }
        self.was_resolved = resolved;

        self.view = Some(view.clone());
    }

    fn render_canvas(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = self.view.as_ref() else {
            return;
        };

        let center_lat = view.focus.lat() + self.pan_lat;
        let center_lng = view.focus.lng() + self.pan_lng;

        // Terminal cells are roughly twice as tall as wide; scale the
        // latitude span so geometry doesn't look squashed.
        let span_lng = self.span_lng();
        let span_lat = if area.width == 0 {
            span_lng
        } else {
            span_lng * f64::from(area.height) * 2.0 / f64::from(area.width)
        };

        let title = format!(" Map  ·  {center_lat:.4},{center_lng:.4}  ·  zoom {} ", self.zoom);
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let show_labels = self.zoom >= 11;
        let label_offset = span_lng / 50.0;

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([center_lng - span_lng / 2.0, center_lng + span_lng / 2.0])
            .y_bounds([center_lat - span_lat / 2.0, center_lat + span_lat / 2.0])
            .paint(|ctx| {
                for entry in &view.displayed {
                    let loc = entry.facility.location;
                    let style = if loc == view.focus {
                        theme::map_marker_focused()
                    } else {
                        theme::map_marker()
                    };
                    ctx.print(loc.lng(), loc.lat(), Line::styled("◆", style));
                    if show_labels {
                        ctx.print(
                            loc.lng() + label_offset,
                            loc.lat(),
                            Line::styled(
                                entry.facility.name.clone(),
                                Style::default().fg(theme::DIM_WHITE),
                            ),
                        );
                    }
                }

                if let Some(user) = view.user_location {
                    ctx.print(
                        user.lng(),
                        user.lat(),
                        Line::styled("●", theme::map_user_marker()),
                    );
                    if show_labels {
                        ctx.print(
                            user.lng() + label_offset,
                            user.lat(),
                            Line::styled("you", theme::map_user_marker()),
                        );
                    }
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = self.view.as_ref() else {
            return;
        };

        let mut spans = vec![
            Span::styled("◆ ", theme::map_marker()),
            Span::styled("facility   ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled("● ", theme::map_user_marker()),
            Span::styled("you   ", Style::default().fg(theme::DIM_WHITE)),
        ];

        // Nearest entry summary once a ranking exists.
        if let Some(nearest) = view.displayed.iter().find(|r| r.distance_km.is_some()) {
            spans.push(Span::styled("nearest: ", theme::key_hint()));
            spans.push(Span::styled(
                format!(
                    "{} ({})",
                    nearest.facility.name,
                    distance_fmt::fmt_opt_km(nearest.distance_km)
                ),
                Style::default().fg(theme::TEAL),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for MapScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('+' | '=') => Some(Action::MapZoomIn),
            KeyCode::Char('-') => Some(Action::MapZoomOut),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::MapPan(-1, 0)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::MapPan(1, 0)),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MapPan(0, 1)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MapPan(0, -1)),
            KeyCode::Char('c') => Some(Action::MapRecenter),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SessionUpdated(view) => self.apply_view(view),
            Action::MapZoomIn => {
                self.zoom = (self.zoom + 1).min(MAX_ZOOM);
            }
            Action::MapZoomOut => {
                self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
            }
            Action::MapPan(dx, dy) => {
                let step = self.span_lng() * PAN_STEP;
                self.pan_lng += f64::from(*dx) * step;
                self.pan_lat += f64::from(*dy) * step;
            }
            Action::MapRecenter => {
                self.pan_lat = 0.0;
                self.pan_lng = 0.0;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [canvas_area, legend_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(1)]).areas(area);
        self.render_canvas(frame, canvas_area);
        self.render_legend(frame, legend_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "map"
    }
}
