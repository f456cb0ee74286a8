//! SongList component — the filtered, title-sorted result list.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use songbook_core::{NavAction, Song};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, CatalogStatus},
    component::Component,
    theme::Palette,
    transition::{Direction, TransitionHint},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub struct SongList {
    /// Catalog indices of the current results.
    pub list: ScrollableList<usize>,
    list_state: ListState,
    /// Rows available at the last draw.
    last_height: usize,
    /// Last click (row, time) for double-click detection.
    last_click: Option<(usize, Instant)>,
    /// Scroll offset to restore once the results are back in the list.
    pending_scroll: Option<usize>,
}

impl SongList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
            list_state: ListState::default(),
            last_height: 0,
            last_click: None,
            pending_scroll: None,
        }
    }

    /// Pick up the navigator's current result set.
    pub fn sync(&mut self, state: &AppState) {
        self.list.set_items(state.nav.results().to_vec());
    }

    /// Move the cursor onto the song shown in the lyrics panel.
    pub fn follow_selection(&mut self, state: &AppState) {
        if let Some(idx) = state.nav.selected_index() {
            self.list.select_item(&idx);
        }
    }

    /// Hold `offset` until the next tick; the list re-syncs its results first.
    pub fn defer_scroll(&mut self, offset: usize) {
        self.pending_scroll = Some(offset);
    }

    /// Apply a held scroll offset. Returns whether one was pending.
    pub fn apply_pending_scroll(&mut self) -> bool {
        match self.pending_scroll.take() {
            Some(offset) => {
                self.list.restore_scroll(offset, self.last_height);
                true
            }
            None => false,
        }
    }

    fn select_current(&self) -> Vec<Action> {
        match self.list.selected_item() {
            Some(&index) => vec![Action::Nav(NavAction::SelectSong {
                index,
                list_scroll: self.list.scroll_offset,
            })],
            None => vec![],
        }
    }

    fn render_item<'a>(
        song: &'a Song,
        is_selected: bool,
        is_shown: bool,
        focused: bool,
        width: usize,
        palette: &Palette,
    ) -> ListItem<'a> {
        let marker = if is_shown { "▶ " } else { "  " };
        let title_style = match (is_selected, focused) {
            (true, true) => palette.style_selected_focused(),
            (true, false) => palette.style_selected(),
            _ => palette.style_default(),
        };

        let mut spans = vec![Span::styled(marker, Style::default().fg(palette.accent))];
        if song.has_title() {
            spans.push(Span::styled(song.title.as_str(), title_style));
        } else {
            spans.push(Span::styled(
                "(untitled)",
                title_style.fg(palette.muted).add_modifier(Modifier::ITALIC),
            ));
        }

        let artists = song.artist_line();
        if !artists.is_empty() {
            spans.push(Span::styled(" · ", palette.style_muted()));
            spans.push(Span::styled(artists, Style::default().fg(palette.artist)));
        }
        if song.has_audio() {
            spans.push(Span::styled(" ♪", Style::default().fg(palette.audio)));
        }
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let preview = fit_width(&song.preview(), width.saturating_sub(used + 2));
        if !preview.is_empty() {
            spans.push(Span::styled(format!("  {}", preview), palette.style_muted()));
        }

        let item = ListItem::new(Line::from(spans));
        if is_selected {
            item.style(Style::default().bg(palette.selection_bg))
        } else {
            item
        }
    }
}

impl Component for SongList {
    fn id(&self) -> ComponentId {
        ComponentId::SongList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => return self.select_current(),

            KeyCode::Char('a') => {
                let artist = self
                    .list
                    .selected_item()
                    .and_then(|&idx| state.nav.catalog().get(idx))
                    .and_then(|song| song.artists.first());
                if let Some(name) = artist {
                    return vec![Action::Nav(NavAction::SelectArtist(name.clone()))];
                }
            }

            KeyCode::Esc if !state.nav.state().query.is_empty() => {
                return vec![Action::Nav(NavAction::ClearQuery)];
            }

            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        let rel_row = event.row.saturating_sub(area.y + 1) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                let hit = self.list.handle_click(rel_row);
                if hit && is_double {
                    self.last_click = None;
                    return self.select_current();
                }
                self.last_click = Some((rel_row, now));
                if hit {
                    return vec![Action::FocusPane(ComponentId::SongList)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let palette = &state.palette;
        let (shown, total) = state.counts();
        let count = format!("{}/{}", shown, total);
        let highlight = matches!(
            state.transition,
            TransitionHint::Active {
                direction: Direction::Leave,
                step
            } if step > 0
        );
        let block = pane_chrome(
            "songs",
            Some('1'),
            focused,
            highlight,
            Some(Badge {
                text: &count,
                color: palette.secondary,
            }),
            palette,
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.last_height = inner.height as usize;

        let empty_msg = match &state.catalog_status {
            CatalogStatus::Loading => Some(format!("  loading songs from {}…", state.catalog_source)),
            CatalogStatus::Failed(e) => Some(format!("  could not load songs: {}", e)),
            CatalogStatus::Ready if self.list.is_empty() => Some(if total == 0 {
                "  the catalog is empty".to_string()
            } else {
                "  no songs match".to_string()
            }),
            CatalogStatus::Ready => None,
        };
        if let Some(msg) = empty_msg {
            frame.render_widget(Paragraph::new(Span::styled(msg, palette.style_muted())), inner);
            return;
        }

        let content_h = inner.height as usize;
        self.list.ensure_visible(content_h);
        let shown_idx = state.nav.selected_index();
        let selected = self.list.selected;
        let catalog = state.nav.catalog();

        let items: Vec<ListItem> = self
            .list
            .visible_items(content_h)
            .into_iter()
            .filter_map(|(pos, &idx)| {
                catalog.get(idx).map(|song| {
                    Self::render_item(
                        song,
                        pos == selected,
                        shown_idx == Some(idx),
                        focused,
                        inner.width as usize,
                        palette,
                    )
                })
            })
            .collect();

        let list = List::new(items).highlight_symbol("");
        self.list_state
            .select(Some(self.list.selected.saturating_sub(self.list.scroll_offset)));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Default for SongList {
    fn default() -> Self {
        Self::new()
    }
}
