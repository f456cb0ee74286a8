//! HelpOverlay component — centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
};

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    /// Any key closes the overlay.
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        vec![Action::ToggleHelp]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if *action == Action::ToggleHelp {
            self.visible = !self.visible;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }
        let palette = &state.palette;
        let popup = centered_rect(64, 34, area);

        let lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " keyboard shortcuts",
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            section(" songs", palette),
            help_row("↑ / ↓  or  j / k", "move selection", palette),
            help_row("pg up / pg dn", "jump 10 rows", palette),
            help_row("enter", "open lyrics", palette),
            help_row("a", "search the song's first artist", palette),
            help_row("esc", "clear the search", palette),
            Line::from(""),
            section(" lyrics", palette),
            help_row("↑ / ↓  or  j / k", "scroll", palette),
            help_row("← / →", "pick an artist", palette),
            help_row("enter", "search the picked artist", palette),
            help_row("p", "play / stop audio", palette),
            help_row("esc / backspace", "back to the list (narrow)", palette),
            Line::from(""),
            section(" search & history", palette),
            help_row("/", "focus the search box", palette),
            help_row("a:name", "match artists only", palette),
            help_row("ctrl-l", "also match lyrics", palette),
            help_row("[ / ]", "previous / next location", palette),
            help_row("y", "copy the current location", palette),
            Line::from(""),
            section(" ui", palette),
            help_row("tab / shift-tab", "focus next / previous pane", palette),
            help_row("t", "toggle light / dark", palette),
            help_row("r", "reload the catalog", palette),
            help_row("K", "toggle keys bar", palette),
            help_row("q / ctrl-c", "quit", palette),
            Line::from(""),
            Line::from(Span::styled(" press any key to close", palette.style_muted())),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.border))
                        .style(Style::default().bg(palette.filter_bg)),
                )
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

fn section<'a>(title: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<18}", key),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(palette.secondary)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
