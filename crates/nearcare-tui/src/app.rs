//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use nearcare_config::MapDefaults;
use nearcare_core::{LocatorService, LocatorSession, ResolutionState};
use nearcare_locate::LocationError;

use crate::action::{Action, Notification, NotificationLevel, SessionView};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on screen.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Search overlay visibility.
    search_active: bool,
    /// Search input state (tui-input).
    search_input: Input,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// The locator session — single source of truth for list, search,
    /// focus, and resolution state.
    session: LocatorSession,
    /// Locator service used to spawn resolve tasks.
    service: LocatorService,
    /// Header throbber while resolving.
    throbber_state: throbber_widgets_tui::ThrobberState,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    /// Create the App with its screens. The session determines the
    /// initial list and map focus; the service runs resolve requests.
    pub fn new(session: LocatorSession, service: LocatorService, map_defaults: MapDefaults) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(map_defaults).into_iter().collect();

        Self {
            active_screen: ScreenId::Locator,
            screens,
            running: true,
            help_visible: false,
            search_active: false,
            search_input: Input::default(),
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            session,
            service,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Snapshot the session for the screens.
    fn session_view(&self) -> SessionView {
        SessionView {
            displayed: self.session.displayed(),
            focus: self.session.focus(),
            user_location: self.session.user_location(),
            is_resolving: self.session.is_resolving(),
            search_term: self.session.search_term().to_owned(),
        }
    }

    /// Push a fresh snapshot through the action channel.
    fn push_session_view(&self) {
        let _ = self
            .action_tx
            .send(Action::SessionUpdated(self.session_view()));
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Seed the screens with the initial (unranked) directory.
        self.push_session_view();

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(50),  // 20 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event to action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen
    /// component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits.
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Search overlay captures all input while open.
        if self.search_active {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::CloseSearch),
                KeyCode::Enter => Some(Action::SearchSubmit),
                _ => {
                    self.search_input
                        .handle_event(&crossterm::event::Event::Key(key));
                    Some(Action::SearchInput(self.search_input.value().to_owned()))
                }
            });
        }

        if self.help_visible {
            // In help mode, Esc or ? closes help
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),

            // "Use my location"
            (KeyModifiers::NONE, KeyCode::Char('u')) => return Ok(Some(Action::RequestLocate)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            // Esc dismisses the toast and any surfaced failure.
            (KeyModifiers::NONE, KeyCode::Esc) => {
                if self.notification.is_some() || self.session.last_error().is_some() {
                    return Ok(Some(Action::DismissNotification));
                }
            }

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to
    /// components.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} to {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::OpenSearch => {
                self.search_active = true;
                // Seed the box with the active term so editing resumes.
                self.search_input = Input::new(self.session.search_term().to_owned());
            }

            Action::CloseSearch => {
                self.search_active = false;
                self.search_input.reset();
                self.session.set_search("");
                self.push_session_view();
            }

            Action::SearchInput(term) => {
                self.session.set_search(term.clone());
                self.push_session_view();
            }

            Action::SearchSubmit => {
                // Keep the term, just close the overlay.
                self.search_active = false;
            }

            Action::RequestLocate => {
                self.spawn_locate();
            }

            Action::LocateFinished { generation, result } => {
                self.finish_locate(*generation, result);
            }

            Action::SelectFacility(index) => {
                if self.session.select(*index).is_some() {
                    self.push_session_view();
                }
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
                self.session.dismiss_error();
                self.push_session_view();
            }

            Action::Tick => {
                if self.session.is_resolving() {
                    self.throbber_state.calc_next();
                }
                // Auto-dismiss notifications.
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
            }

            Action::Render
            | Action::SessionUpdated(_)
            | Action::MapZoomIn
            | Action::MapZoomOut
            | Action::MapPan(..)
            | Action::MapRecenter => {}
        }

        // Propagate to every screen; collect follow-ups.
        let mut follow_ups = Vec::new();
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                follow_ups.push(follow_up);
            }
        }
        for follow_up in follow_ups {
            self.action_tx.send(follow_up)?;
        }

        Ok(())
    }

    /// Start (or cancel-and-replace) a resolve request and spawn the
    /// async task that completes it.
    fn spawn_locate(&mut self) {
        let generation = self.session.begin_resolve();
        self.push_session_view();

        let service = self.service.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = service.locate().await;
            // The session drops this on the floor if a newer request
            // replaced it (or the view is gone).
            let _ = tx.send(Action::LocateFinished {
                generation,
                result: Box::new(result),
            });
        });
    }

    /// Apply a resolve completion, unless it is stale.
    fn finish_locate(
        &mut self,
        generation: u64,
        result: &Result<nearcare_core::Resolution, LocationError>,
    ) {
        if !self.session.complete_resolve(generation, result.clone()) {
            debug!(generation, "ignored stale locate completion");
            return;
        }

        match self.session.state() {
            ResolutionState::Resolved { resolution, .. } => {
                let nearest = resolution
                    .ranked
                    .first()
                    .map_or_else(String::new, |r| format!("  ·  nearest: {}", r.facility.name));
                let _ = self.action_tx.send(Action::Notify(Notification::success(
                    format!("Position resolved via {}{nearest}", resolution.source),
                )));
            }
            ResolutionState::Failed { error, .. } => {
                let _ = self
                    .action_tx
                    .send(Action::Notify(Notification::error(friendly_error(error))));
            }
            ResolutionState::Idle | ResolutionState::Resolving { .. } => {}
        }

        self.push_session_view();
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_header(frame, header_area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, body_area);
        }

        self.render_footer(frame, footer_area);

        if self.search_active {
            self.render_search(frame);
        }
        if self.help_visible {
            self.render_help(frame);
        }
        if let Some((notification, _)) = &self.notification {
            self.render_notification(frame, notification);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let [tabs_area, status_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(28)]).areas(area);

        let titles = ScreenId::ALL
            .iter()
            .map(|s| format!(" {} {} ", s.number(), s.label()));
        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme::tab_inactive())
            .highlight_style(theme::tab_active())
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        // Right side: resolving throbber or the resolved position.
        if self.session.is_resolving() {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("locating…")
                .style(Style::default().fg(theme::DIM_WHITE))
                .throbber_style(Style::default().fg(theme::SKY_BLUE));
            frame.render_stateful_widget(
                throbber,
                status_area,
                &mut self.throbber_state.clone(),
            );
        } else if let Some(user) = self.session.user_location() {
            let status = Paragraph::new(Line::from(vec![
                Span::styled("● ", theme::map_user_marker()),
                Span::styled(user.to_string(), Style::default().fg(theme::DIM_WHITE)),
            ]));
            frame.render_widget(status, status_area);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let hint = |key: &str, label: &str| {
            vec![
                Span::styled(format!(" {key} "), theme::key_hint_key()),
                Span::styled(format!("{label} "), theme::key_hint()),
            ]
        };

        let mut spans = Vec::new();
        spans.extend(hint("u", "use my location"));
        spans.extend(hint("/", "search"));
        spans.extend(hint("tab", "screen"));
        spans.extend(hint("?", "help"));
        spans.extend(hint("q", "quit"));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_search(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = area.width.saturating_sub(8).clamp(20, 60);
        let popup = Rect::new(
            (area.width.saturating_sub(width)) / 2,
            area.height.saturating_sub(6),
            width,
            3,
        );

        let block = Block::default()
            .title(" Search name or address ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);

        frame.render_widget(Clear, popup);
        frame.render_widget(block, popup);
        frame.render_widget(
            Paragraph::new(self.search_input.value())
                .style(Style::default().fg(theme::DIM_WHITE)),
            inner,
        );

        // Cursor at the input position.
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let cursor_x = inner.x + self.search_input.visual_cursor() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right()), inner.y));
    }

    fn render_help(&self, frame: &mut Frame) {
        let area = frame.area();
        let width = 44u16.min(area.width.saturating_sub(4));
        let height = 14u16.min(area.height.saturating_sub(2));
        let popup = Rect::new(
            (area.width.saturating_sub(width)) / 2,
            (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );

        let entry = |key: &str, label: &str| {
            Line::from(vec![
                Span::styled(format!("  {key:<9}"), theme::key_hint_key()),
                Span::styled(label.to_owned(), Style::default().fg(theme::DIM_WHITE)),
            ])
        };

        let lines = vec![
            entry("u", "use my location (rank by distance)"),
            entry("/", "search name or address"),
            entry("enter", "focus map on selection"),
            entry("j/k", "move selection"),
            entry("1/2 tab", "switch screen"),
            entry("+/-", "map zoom"),
            entry("h/j/k/l", "map pan"),
            entry("c", "map recenter"),
            entry("esc", "dismiss message / close overlay"),
            entry("q", "quit"),
        ];

        let block = Block::default()
            .title(" Keys ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }

    fn render_notification(&self, frame: &mut Frame, notification: &Notification) {
        let area = frame.area();
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let width = (notification.message.len() as u16 + 4)
            .min(area.width.saturating_sub(2));
        let popup = Rect::new(area.width.saturating_sub(width + 1), 1, width, 3);

        let color = match notification.level {
            NotificationLevel::Info => theme::SKY_BLUE,
            NotificationLevel::Success => theme::SOFT_GREEN,
            NotificationLevel::Error => theme::ALERT_RED,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(notification.message.clone())
                .style(Style::default().fg(color))
                .block(block),
            popup,
        );
    }
}

/// User-facing message for a resolution failure.
fn friendly_error(error: &LocationError) -> String {
    match error {
        LocationError::PermissionDenied => {
            "Location permission denied — set locator.provider in your config".into()
        }
        LocationError::Unavailable { message } => format!("Location unavailable: {message}"),
        LocationError::Timeout { elapsed_secs } => {
            format!("Location request timed out after {elapsed_secs}s — press u to retry")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendly_errors_name_the_reason() {
        assert!(friendly_error(&LocationError::PermissionDenied).contains("denied"));
        assert!(
            friendly_error(&LocationError::Unavailable {
                message: "no route".into()
            })
            .contains("no route")
        );
        assert!(friendly_error(&LocationError::Timeout { elapsed_secs: 10 }).contains("10s"));
    }
}
