//! LyricsView component — the detail panel for the selected song.
//!
//! Shows the title, one chip per artist (Enter searches that artist), the
//! audio line when the song has a resource, and the scrollable lyrics.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use songbook_core::{NavAction, Song};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::Palette,
    transition::{Direction, TransitionHint},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct LyricsView {
    scroll: u16,
    artist_cursor: usize,
    /// Catalog index rendered last; scroll and chip cursor reset when it changes.
    shown: Option<usize>,
}

impl LyricsView {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            artist_cursor: 0,
            shown: None,
        }
    }

    fn reset_if_changed(&mut self, state: &AppState) {
        let now = state.nav.selected_index();
        if now != self.shown {
            self.shown = now;
            self.scroll = 0;
            self.artist_cursor = 0;
        }
    }

    fn header_lines<'a>(
        &self,
        song: &'a Song,
        focused: bool,
        back_visible: bool,
        state: &AppState,
    ) -> Vec<Line<'a>> {
        let palette = &state.palette;
        let mut lines = Vec::new();

        if back_visible {
            lines.push(Line::from(Span::styled(
                "‹ back (esc)",
                Style::default().fg(palette.secondary),
            )));
        }

        lines.push(if song.has_title() {
            Line::from(Span::styled(
                song.title.as_str(),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "(untitled)",
                palette.style_muted().add_modifier(Modifier::ITALIC),
            ))
        });

        if !song.artists.is_empty() {
            lines.push(artist_chips(song, self.artist_cursor, focused, palette));
        }

        if let Some(resource) = state.audio.resource.as_deref() {
            let (icon, hint) = if state.audio.playing {
                ("■", "p stop")
            } else {
                ("▶", "p play")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", icon), Style::default().fg(palette.audio)),
                Span::styled(resource.to_string(), palette.style_secondary()),
                Span::styled(format!("  {}", hint), palette.style_muted()),
            ]));
        }

        lines.push(Line::from(""));
        lines
    }
}

fn artist_chips<'a>(song: &'a Song, cursor: usize, focused: bool, palette: &Palette) -> Line<'a> {
    let mut spans = Vec::with_capacity(song.artists.len() * 2);
    for (i, artist) in song.artists.iter().enumerate() {
        let style = if focused && i == cursor {
            Style::default()
                .fg(palette.bg)
                .bg(palette.artist)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.artist)
        };
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{}]", artist), style));
    }
    Line::from(spans)
}

impl Component for LyricsView {
    fn id(&self) -> ComponentId {
        ComponentId::Lyrics
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.reset_if_changed(state);
        let Some(song) = state.selected_song() else {
            return vec![];
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,

            KeyCode::Left | KeyCode::Char('h') => {
                self.artist_cursor = self.artist_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.artist_cursor + 1 < song.artists.len() {
                    self.artist_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('a') => {
                if let Some(name) = song.artists.get(self.artist_cursor) {
                    return vec![Action::Nav(NavAction::SelectArtist(name.clone()))];
                }
            }

            KeyCode::Esc | KeyCode::Backspace if state.nav.panels().back => {
                return vec![Action::Nav(NavAction::Back)];
            }

            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => self.scroll = self.scroll.saturating_add(3),
            MouseEventKind::Down(_) => return vec![Action::FocusPane(ComponentId::Lyrics)],
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.reset_if_changed(state);
        let palette = &state.palette;
        let highlight = matches!(
            state.transition,
            TransitionHint::Active {
                direction: Direction::Enter,
                step
            } if step > 0
        );
        let badge = state.audio.resource.as_ref().map(|_| Badge {
            text: if state.audio.playing { "♪ playing" } else { "♪" },
            color: palette.audio,
        });
        let block = pane_chrome("lyrics", Some('2'), focused, highlight, badge, palette);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(song) = state.selected_song() else {
            frame.render_widget(
                Paragraph::new(Span::styled("  select a song to read its lyrics", palette.style_muted())),
                inner,
            );
            return;
        };

        let back_visible = state.nav.panels().back;
        let mut lines = self.header_lines(song, focused, back_visible, state);
        if song.lyrics.trim().is_empty() {
            lines.push(Line::from(Span::styled("no lyrics", palette.style_muted())));
        } else {
            lines.extend(
                song.lyrics
                    .lines()
                    .map(|l| Line::from(Span::styled(l, palette.style_default()))),
            );
        }

        // Keep at least one line on screen.
        let max_scroll = lines.len().saturating_sub(1).min(u16::MAX as usize) as u16;
        self.scroll = self.scroll.min(max_scroll);

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            inner,
        );
    }
}

impl Default for LyricsView {
    fn default() -> Self {
        Self::new()
    }
}
