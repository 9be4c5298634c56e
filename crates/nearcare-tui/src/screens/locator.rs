//! Facilities screen — the searchable, distance-ranked directory list.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::{Action, SessionView};
use crate::component::Component;
use crate::theme;
use crate::widgets::distance_fmt;

pub struct LocatorScreen {
    focused: bool,
    #[allow(dead_code)]
    action_tx: Option<UnboundedSender<Action>>,
    view: Option<SessionView>,
    table_state: TableState,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl LocatorScreen {
    pub fn new() -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            focused: false,
            action_tx: None,
            view: None,
            table_state,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn displayed_len(&self) -> usize {
        self.view.as_ref().map_or(0, |v| v.displayed.len())
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.displayed_len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.displayed_len();
        if len == 0 {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = self.view.as_ref() else {
            return;
        };

        let shown = view.displayed.len();
        let mut title = format!(" Facilities ({shown}) ");
        if !view.search_term.is_empty() {
            title = format!(" Facilities ({shown})  /{} ", view.search_term);
        }

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

        let header = Row::new(vec![
            Cell::from("#"),
            Cell::from("Name"),
            Cell::from("Kind"),
            Cell::from("Distance"),
            Cell::from("Address"),
        ])
        .style(theme::table_header());

        let rows = view.displayed.iter().enumerate().map(|(i, r)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(r.facility.name.clone()),
                Cell::from(r.facility.kind.to_string()),
                Cell::from(distance_fmt::fmt_opt_km(r.distance_km)),
                Cell::from(r.facility.address.clone()),
            ])
            .style(theme::table_row())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(34),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Min(20),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::table_selected());

        frame.render_stateful_widget(table, area, &mut self.table_state.clone());

        if view.is_resolving {
            self.render_throbber(frame, area);
        }
    }

    fn render_throbber(&self, frame: &mut Frame, area: Rect) {
        let label_width = 16u16;
        if area.width <= label_width + 2 || area.height < 1 {
            return;
        }
        let spot = Rect::new(area.right() - label_width - 2, area.y, label_width, 1);
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("resolving…")
            .style(Style::default().fg(theme::DIM_WHITE))
            .throbber_style(Style::default().fg(theme::SKY_BLUE));
        frame.render_stateful_widget(throbber, spot, &mut self.throbber_state.clone());
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Selected ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(entry) = self
            .view
            .as_ref()
            .and_then(|v| v.displayed.get(self.selected_index()))
        else {
            frame.render_widget(
                Paragraph::new("No facility matches the current search.")
                    .style(Style::default().fg(theme::DIM_WHITE)),
                inner,
            );
            return;
        };

        let facility = &entry.facility;
        let label = Style::default().fg(theme::DIM_WHITE);
        let value = Style::default().fg(theme::TEAL);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Name      ", label),
                Span::styled(facility.name.clone(), theme::title_style()),
            ]),
            Line::from(vec![
                Span::styled("  Kind      ", label),
                Span::styled(facility.kind.to_string(), value),
                Span::styled("    Distance  ", label),
                Span::styled(distance_fmt::fmt_opt_km(entry.distance_km), value),
            ]),
            Line::from(vec![
                Span::styled("  Address   ", label),
                Span::styled(facility.address.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("  Location  ", label),
                Span::styled(facility.location.to_string(), value),
            ]),
        ];
        if let Some(ref phone) = facility.phone {
            lines.push(Line::from(vec![
                Span::styled("  Phone     ", label),
                Span::styled(phone.clone(), value),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for LocatorScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select(usize::MAX);
                Ok(None)
            }
            KeyCode::Enter => Ok(Some(Action::SelectFacility(self.selected_index()))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SessionUpdated(view) => {
                self.view = Some(view.clone());
                // Keep the selection in range after filtering.
                self.select(self.selected_index());
            }
            Action::Tick => {
                if self.view.as_ref().is_some_and(|v| v.is_resolving) {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [table_area, detail_area] =
            Layout::vertical([Constraint::Min(5), Constraint::Length(7)]).areas(area);
        self.render_table(frame, table_area);
        self.render_detail(frame, detail_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "locator"
    }
}
