//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use songbook_core::prefs::ThemeMode;
use songbook_core::{MemoryHistory, Navigator, Song};

use crate::audio::AudioStatus;
use crate::theme::Palette;
use crate::transition::TransitionHint;
use crate::widgets::status_bar::InputMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct AppState {
    // ── Navigation ───────────────────────────────────────────────────────────
    pub nav: Navigator<MemoryHistory>,
    pub catalog_source: String,
    pub catalog_status: CatalogStatus,

    // ── UI mode ──────────────────────────────────────────────────────────────
    pub input_mode: InputMode,
    pub theme: ThemeMode,
    pub palette: Palette,

    // ── Audio ────────────────────────────────────────────────────────────────
    pub audio: AudioStatus,

    // ── Render hints ─────────────────────────────────────────────────────────
    pub transition: TransitionHint,
}

impl AppState {
    pub fn new(nav: Navigator<MemoryHistory>, catalog_source: String, theme: ThemeMode) -> Self {
        Self {
            nav,
            catalog_source,
            catalog_status: CatalogStatus::Loading,
            input_mode: InputMode::Normal,
            theme,
            palette: Palette::for_mode(theme),
            audio: AudioStatus::default(),
            transition: TransitionHint::Idle,
        }
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
        self.palette = Palette::for_mode(theme);
    }

    /// Song shown in the lyrics panel.
    pub fn selected_song(&self) -> Option<&Song> {
        self.nav.selected_song()
    }

    /// Number of songs in the filtered list, and in the catalog.
    pub fn counts(&self) -> (usize, usize) {
        (self.nav.results().len(), self.nav.catalog().len())
    }
}
