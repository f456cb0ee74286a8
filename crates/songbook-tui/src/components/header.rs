//! Header component — app title, result count, flags, and the search box.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use songbook_core::NavAction;

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, CatalogStatus},
    component::Component,
    widgets::filter_input::{FilterAction, FilterInput},
};

pub struct Header {
    pub search: FilterInput,
}

impl Header {
    pub fn new() -> Self {
        Self {
            search: FilterInput::default(),
        }
    }

    /// Mirror the navigator's query into the search box.
    pub fn sync_query(&mut self, query: &str) {
        self.search.set_value(query);
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Search
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match self.search.handle_key(key) {
            FilterAction::Changed(q) => vec![Action::Nav(NavAction::UpdateQuery(q))],
            FilterAction::Cleared => vec![Action::Nav(NavAction::ClearQuery)],
            FilterAction::Confirmed | FilterAction::Cancelled => vec![Action::CloseSearch],
            FilterAction::None => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenSearch => self.search.activate(),
            Action::CloseSearch => self.search.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let palette = &state.palette;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let (shown, total) = state.counts();
        let lyrics_flag = state.nav.state().search_lyrics;

        let mut spans = vec![
            Span::styled(
                " songbook",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", Style::default()),
        ];
        match &state.catalog_status {
            CatalogStatus::Loading => {
                spans.push(Span::styled("loading…", palette.style_muted()));
            }
            CatalogStatus::Failed(_) => {
                spans.push(Span::styled(
                    "catalog unavailable",
                    Style::default().fg(palette.toast_error),
                ));
            }
            CatalogStatus::Ready => {
                spans.push(Span::styled(
                    format!("{} / {} songs", shown, total),
                    palette.style_secondary(),
                ));
            }
        }
        spans.push(Span::styled("  ·  ", palette.style_muted()));
        spans.push(Span::styled(
            if lyrics_flag { "[x] lyrics" } else { "[ ] lyrics" },
            if lyrics_flag {
                Style::default().fg(palette.filter_fg)
            } else {
                palette.style_muted()
            },
        ));
        spans.push(Span::styled("  ·  ", palette.style_muted()));
        spans.push(Span::styled(state.theme.label(), palette.style_muted()));
        if self.search.is_active() {
            spans.push(Span::styled(
                "  ·  enter keeps, esc clears",
                Style::default().fg(state.input_mode.color(palette)),
            ));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.bg)),
            rows[0],
        );
        self.search.draw(frame, rows[1], palette);
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
