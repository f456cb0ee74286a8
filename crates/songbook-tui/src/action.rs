//! Action enum — all user-initiated intents and internal events.

use songbook_core::NavAction;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Search,
    SongList,
    Lyrics,
    HelpOverlay,
}

impl ComponentId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::SongList => "songs",
            Self::Lyrics => "lyrics",
            Self::HelpOverlay => "help",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "songs" => Some(Self::SongList),
            "lyrics" => Some(Self::Lyrics),
            _ => None,
        }
    }
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation state machine ─────────────────────────────────────────────
    Nav(NavAction),
    /// Step the location history (like the browser back/forward buttons).
    HistoryBack,
    HistoryForward,

    // ── Focus ────────────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Search box ───────────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    ToggleLyricsSearch,

    // ── Audio ────────────────────────────────────────────────────────────────
    ToggleAudio,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleTheme,
    ToggleHelp,
    ToggleKeys,
    CopyLocation,
    ReloadCatalog,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
