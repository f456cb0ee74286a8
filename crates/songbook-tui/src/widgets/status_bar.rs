//! Status bar — bottom line with the input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use songbook_core::View;

use crate::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "BROWSE",
            Self::Search => "SEARCH",
        }
    }

    pub fn color(self, palette: &Palette) -> Color {
        match self {
            Self::Normal => palette.mode_normal,
            Self::Search => palette.mode_search,
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(palette.separator),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    view: View,
    back_visible: bool,
    palette: &Palette,
) {
    let label = Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(mode.color(palette))
            .add_modifier(Modifier::BOLD),
    );

    let keys = match (mode, view) {
        (InputMode::Search, _) => {
            " type to search  ^L lyrics  Up/Down move  Enter keep  Esc clear/close"
        }
        (InputMode::Normal, View::Detail) if back_visible => {
            " ↑↓/jk scroll  ←→ artist  Enter search artist  p play  Esc back  [ ] history  / search  ? help  q quit"
        }
        (InputMode::Normal, _) => {
            " ↑↓/jk select  Enter open  a artist  / search  ^L lyrics  Tab panes  [ ] history  t theme  y copy  ? help  q quit"
        }
    };

    let line = Line::from(vec![
        label,
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(palette.muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
