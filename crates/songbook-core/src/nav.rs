//! Navigation State Machine — keeps the visible list, the selected song, the
//! search query, and the location in agreement.
//!
//! State is the source of truth; the location is a serialization of it,
//! written on every transition that changes it. The one exception is
//! [`Navigator::hydrate_from_url`], which reads the location into state (at
//! startup and after back/forward) and never writes.
//!
//! Every transition is synchronous and returns the [`Effect`]s the host must
//! carry out. `RestoreScroll` is meant for the host's *next* tick, after the
//! list has been laid out again.

use tracing::debug;

use crate::catalog::Catalog;
use crate::filter::{self, Query};
use crate::history::History;
use crate::location::{QueryParams, SEARCH_PARAM, SONG_PARAM};
use crate::song::Song;
use crate::viewport::{LayoutMode, Panels, View, DEFAULT_BREAKPOINT};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Raw search text; empty means the whole catalog.
    pub query: String,
    /// Also match lyrics. Session-only: never written to the location.
    pub search_lyrics: bool,
    /// Title of the song shown in the detail panel.
    pub selected_song_title: Option<String>,
    pub view: View,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Point the audio widget at the selected song's resource (or nothing).
    SetupAudio(Option<String>),
    /// Restore the list scroll offset captured when the song was selected.
    RestoreScroll(usize),
    /// The filtered result set was recomputed.
    ResultsChanged,
}

/// Semantic user actions, decoupled from whatever produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    SelectSong { index: usize, list_scroll: usize },
    SelectArtist(String),
    UpdateQuery(String),
    ClearQuery,
    SetSearchLyrics(bool),
    Back,
    HydrateFromUrl,
    Resize(u16),
}

pub struct Navigator<H: History> {
    catalog: Catalog,
    state: NavigationState,
    /// Catalog indices matching the current query, in catalog order.
    results: Vec<usize>,
    /// Catalog index of the detail song; the title alone can be ambiguous.
    selected: Option<usize>,
    /// List scroll offset at the most recent `select_song`.
    saved_scroll: Option<usize>,
    layout: LayoutMode,
    breakpoint: u16,
    history: H,
}

impl<H: History> Navigator<H> {
    pub fn new(catalog: Catalog, history: H) -> Self {
        let results = (0..catalog.len()).collect();
        Self {
            catalog,
            state: NavigationState::default(),
            results,
            selected: None,
            saved_scroll: None,
            layout: LayoutMode::Wide,
            breakpoint: DEFAULT_BREAKPOINT,
            history,
        }
    }

    pub fn with_breakpoint(mut self, breakpoint: u16) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn results(&self) -> &[usize] {
        &self.results
    }

    pub fn result_songs(&self) -> impl Iterator<Item = (usize, &Song)> {
        self.results
            .iter()
            .filter_map(|&idx| self.catalog.get(idx).map(|song| (idx, song)))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.selected.and_then(|idx| self.catalog.get(idx))
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn breakpoint(&self) -> u16 {
        self.breakpoint
    }

    pub fn panels(&self) -> Panels {
        Panels::derive(self.layout, self.state.view)
    }

    /// The current location as a query string.
    pub fn location(&self) -> String {
        self.history.read().to_query_string()
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    // ── Dispatch table ────────────────────────────────────────────────────────

    pub fn dispatch(&mut self, action: NavAction) -> Vec<Effect> {
        debug!("nav: {:?}", action);
        match action {
            NavAction::SelectSong { index, list_scroll } => self.select_song(index, list_scroll),
            NavAction::SelectArtist(name) => self.select_artist(&name),
            NavAction::UpdateQuery(query) => self.update_query(&query),
            NavAction::ClearQuery => self.clear_query(),
            NavAction::SetSearchLyrics(flag) => self.set_search_lyrics(flag),
            NavAction::Back => self.back(),
            NavAction::HydrateFromUrl => self.hydrate_from_url(),
            NavAction::Resize(width) => self.resize(width),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Show `index` in the detail panel and record it in the location.
    /// `list_scroll` is the list offset to come back to on [`Self::back`].
    pub fn select_song(&mut self, index: usize, list_scroll: usize) -> Vec<Effect> {
        let Some(path) = self.catalog.get(index).map(|s| s.path.clone()) else {
            debug!("select_song: index {} out of range", index);
            return Vec::new();
        };
        self.saved_scroll = Some(list_scroll);
        self.show_song(index);

        let mut params = self.history.read();
        match &self.state.selected_song_title {
            Some(title) => params.set(SONG_PARAM, title.clone()),
            None => {
                params.delete(SONG_PARAM);
            }
        }
        self.history.write(params);

        vec![Effect::SetupAudio(path)]
    }

    /// Search for `name` in artist mode. On a narrow layout this also returns
    /// to the list; on a wide one the detail panel keeps its song.
    pub fn select_artist(&mut self, name: &str) -> Vec<Effect> {
        let effects = self.update_query(&Query::for_artist(name));
        if self.layout.is_narrow() {
            self.state.view = View::List;
        }
        effects
    }

    /// Re-filter with `query` and record it in the location. The selected song
    /// is left alone.
    pub fn update_query(&mut self, query: &str) -> Vec<Effect> {
        self.apply_query(query);

        let mut params = self.history.read();
        params.set(SEARCH_PARAM, query);
        self.history.write(params);

        vec![Effect::ResultsChanged]
    }

    /// Empty the query and drop the `search` parameter entirely.
    pub fn clear_query(&mut self) -> Vec<Effect> {
        self.apply_query("");

        let mut params = self.history.read();
        if params.delete(SEARCH_PARAM) {
            self.history.write(params);
        }

        vec![Effect::ResultsChanged]
    }

    /// Toggle lyric matching. Not part of the location.
    pub fn set_search_lyrics(&mut self, flag: bool) -> Vec<Effect> {
        if self.state.search_lyrics == flag {
            return Vec::new();
        }
        self.state.search_lyrics = flag;
        self.refilter();
        vec![Effect::ResultsChanged]
    }

    /// Leave the detail view. A no-op in the list view.
    pub fn back(&mut self) -> Vec<Effect> {
        if self.state.view == View::List {
            return Vec::new();
        }
        let mut effects: Vec<Effect> = self.clear_selection().into_iter().collect();

        let mut params = self.history.read();
        params.delete(SONG_PARAM);
        self.history.write(params);

        effects.extend(self.saved_scroll.map(Effect::RestoreScroll));
        effects
    }

    /// Rebuild state from the current location. Unknown songs fall back to
    /// the list silently.
    pub fn hydrate_from_url(&mut self) -> Vec<Effect> {
        let params = self.history.read();
        let mut effects = Vec::new();

        let query = params.get(SEARCH_PARAM).unwrap_or_default().to_string();
        if query != self.state.query {
            self.apply_query(&query);
            effects.push(Effect::ResultsChanged);
        }

        let wanted = params.get(SONG_PARAM).filter(|t| !t.is_empty());
        let found = wanted.and_then(|title| self.catalog.find_by_title(title).map(|(i, _)| i));
        match found {
            Some(index) => {
                self.show_song(index);
                let path = self.catalog.get(index).and_then(|s| s.path.clone());
                effects.push(Effect::SetupAudio(path));
            }
            None => {
                if let Some(title) = wanted {
                    debug!("hydrate: song {:?} not in catalog, showing list", title);
                }
                effects.extend(self.clear_selection());
            }
        }
        effects
    }

    /// Re-derive the layout for a new width. Nothing is re-filtered.
    pub fn resize(&mut self, width: u16) -> Vec<Effect> {
        self.layout = LayoutMode::from_width(width, self.breakpoint);
        Vec::new()
    }

    /// Swap in a freshly loaded catalog, keeping query and selection by title.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Vec<Effect> {
        self.catalog = catalog;
        self.refilter();

        let reselected = self
            .state
            .selected_song_title
            .as_deref()
            .and_then(|title| self.catalog.find_by_title(title).map(|(i, _)| i));
        let mut effects = vec![Effect::ResultsChanged];
        match reselected {
            Some(index) => self.selected = Some(index),
            None => effects.extend(self.clear_selection()),
        }
        effects
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Drop the shown song and return to the list. Yields the effect that
    /// silences its audio when a song was shown.
    fn clear_selection(&mut self) -> Option<Effect> {
        let had_song = self.selected.take().is_some();
        self.state.selected_song_title = None;
        self.state.view = View::List;
        had_song.then_some(Effect::SetupAudio(None))
    }

    fn show_song(&mut self, index: usize) {
        let title = self
            .catalog
            .get(index)
            .filter(|s| s.has_title())
            .map(|s| s.title.clone());
        self.selected = Some(index);
        self.state.selected_song_title = title;
        self.state.view = View::Detail;
    }

    fn apply_query(&mut self, query: &str) {
        self.state.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.results = filter::filter(&self.catalog, &self.state.query, self.state.search_lyrics);
        debug!(
            "search {:?} (lyrics: {}): {} results",
            self.state.query,
            self.state.search_lyrics,
            self.results.len()
        );
    }
}

/// Build the location that shows `song` with `query` applied.
pub fn location_for(song: Option<&str>, query: Option<&str>) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(title) = song {
        params.set(SONG_PARAM, title);
    }
    if let Some(q) = query {
        params.set(SEARCH_PARAM, q);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;

    fn catalog() -> Catalog {
        Catalog::from_songs(vec![
            Song::new("Zeta", &["Amy"], "omega words").with_path("audio/zeta.mp3"),
            Song::new("Alpha", &["Amy", "Bob"], "first words"),
            Song::new("Mid", &["Cleo"], "middle words"),
        ])
    }

    fn navigator(location: &str) -> Navigator<MemoryHistory> {
        Navigator::new(catalog(), MemoryHistory::from_location(location))
    }

    fn titles(nav: &Navigator<MemoryHistory>) -> Vec<&str> {
        nav.result_songs().map(|(_, s)| s.title.as_str()).collect()
    }

    #[test]
    fn test_initial_state_lists_everything() {
        let nav = navigator("");
        assert_eq!(titles(&nav), vec!["Alpha", "Mid", "Zeta"]);
        assert_eq!(nav.view(), View::List);
        assert_eq!(nav.location(), "");
    }

    #[test]
    fn test_select_song_writes_location_and_sets_up_audio() {
        let mut nav = navigator("");
        let effects = nav.select_song(2, 7);
        assert_eq!(effects, vec![Effect::SetupAudio(Some("audio/zeta.mp3".into()))]);
        assert_eq!(nav.view(), View::Detail);
        assert_eq!(nav.state().selected_song_title.as_deref(), Some("Zeta"));
        assert_eq!(nav.location(), "?song=Zeta");
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let mut nav = navigator("");
        assert!(nav.select_song(99, 0).is_empty());
        assert_eq!(nav.view(), View::List);
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_update_query_keeps_selection() {
        let mut nav = navigator("");
        nav.select_song(0, 0);
        let effects = nav.update_query("zeta");
        assert_eq!(effects, vec![Effect::ResultsChanged]);
        assert_eq!(titles(&nav), vec!["Zeta"]);
        assert_eq!(nav.state().selected_song_title.as_deref(), Some("Alpha"));
        assert_eq!(nav.location(), "?song=Alpha&search=zeta");
    }

    #[test]
    fn test_update_query_empty_keeps_param() {
        let mut nav = navigator("");
        nav.update_query("");
        assert_eq!(nav.location(), "?search=");
    }

    #[test]
    fn test_clear_query_removes_param() {
        let mut nav = navigator("");
        nav.update_query("mid");
        nav.clear_query();
        assert_eq!(nav.state().query, "");
        assert_eq!(nav.location(), "");
        assert_eq!(titles(&nav).len(), 3);
    }

    #[test]
    fn test_select_artist_narrow_returns_to_list() {
        let mut nav = navigator("");
        nav.resize(60);
        nav.select_song(1, 0);
        assert_eq!(nav.panels(), Panels { list: false, detail: true, back: true });

        nav.select_artist("Bob");
        assert_eq!(nav.state().query, "a:Bob");
        assert_eq!(titles(&nav), vec!["Alpha"]);
        assert_eq!(nav.view(), View::List);
        assert_eq!(nav.panels(), Panels { list: true, detail: false, back: false });
    }

    #[test]
    fn test_select_artist_wide_keeps_detail() {
        let mut nav = navigator("");
        nav.resize(160);
        nav.select_song(0, 0);
        nav.select_artist("Amy");
        assert_eq!(nav.view(), View::Detail);
        assert_eq!(nav.state().selected_song_title.as_deref(), Some("Alpha"));
        assert_eq!(titles(&nav), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_back_restores_scroll_and_drops_song_param() {
        let mut nav = navigator("?search=");
        nav.select_song(2, 12);
        let effects = nav.back();
        assert_eq!(effects, vec![Effect::SetupAudio(None), Effect::RestoreScroll(12)]);
        assert_eq!(nav.view(), View::List);
        assert!(nav.selected_song().is_none());
        assert_eq!(nav.location(), "?search=");
    }

    #[test]
    fn test_back_from_list_is_idempotent() {
        let mut nav = navigator("?search=a");
        let before_len = nav.history().len();
        let before_state = nav.state().clone();
        assert!(nav.back().is_empty());
        assert!(nav.back().is_empty());
        assert_eq!(nav.history().len(), before_len);
        assert_eq!(nav.state(), &before_state);
        assert_eq!(nav.location(), "?search=a");
    }

    #[test]
    fn test_lyrics_flag_not_in_location() {
        let mut nav = navigator("");
        nav.update_query("middle");
        assert!(titles(&nav).is_empty());
        nav.set_search_lyrics(true);
        assert_eq!(titles(&nav), vec!["Mid"]);
        assert_eq!(nav.location(), "?search=middle");
    }

    #[test]
    fn test_hydrate_song_case_insensitive() {
        let mut nav = navigator("?song=ZETA");
        let effects = nav.hydrate_from_url();
        assert_eq!(effects, vec![Effect::SetupAudio(Some("audio/zeta.mp3".into()))]);
        assert_eq!(nav.view(), View::Detail);
        assert_eq!(nav.state().selected_song_title.as_deref(), Some("Zeta"));
        // Hydration reads only.
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_hydrate_unknown_song_falls_back_to_list() {
        let mut nav = navigator("?song=Nope");
        assert!(nav.hydrate_from_url().is_empty());
        assert_eq!(nav.view(), View::List);
        assert!(nav.state().selected_song_title.is_none());

        // Falling back from a shown song silences its audio.
        nav.select_song(2, 0);
        nav.history_mut().write(QueryParams::parse("?song=Gone"));
        assert_eq!(nav.hydrate_from_url(), vec![Effect::SetupAudio(None)]);
        assert_eq!(nav.view(), View::List);
        assert!(nav.selected_song().is_none());
    }

    #[test]
    fn test_hydrate_song_and_search_restores_both() {
        let mut nav = navigator("?song=Zeta&search=a%3Aamy");
        let effects = nav.hydrate_from_url();
        assert_eq!(
            effects,
            vec![
                Effect::ResultsChanged,
                Effect::SetupAudio(Some("audio/zeta.mp3".into()))
            ]
        );
        assert_eq!(nav.state().query, "a:amy");
        assert_eq!(titles(&nav), vec!["Alpha", "Zeta"]);
        assert_eq!(nav.view(), View::Detail);
        assert_eq!(nav.selected_song().map(|s| s.title.as_str()), Some("Zeta"));
    }

    #[test]
    fn test_hydrate_search() {
        let mut nav = navigator("?search=a%3Abob");
        assert_eq!(nav.hydrate_from_url(), vec![Effect::ResultsChanged]);
        assert_eq!(nav.state().query, "a:bob");
        assert_eq!(titles(&nav), vec!["Alpha"]);
        assert_eq!(nav.view(), View::List);
    }

    #[test]
    fn test_hydrate_empty_location_resets() {
        let mut nav = navigator("");
        nav.update_query("mid");
        nav.select_song(1, 0);
        nav.history_mut().write(QueryParams::new());
        nav.hydrate_from_url();
        assert_eq!(nav.state().query, "");
        assert_eq!(nav.view(), View::List);
        assert_eq!(titles(&nav).len(), 3);
    }

    #[test]
    fn test_round_trip_through_location() {
        let mut nav = navigator("");
        nav.select_song(1, 0);
        let url = nav.location();

        let mut fresh = navigator(&url);
        fresh.hydrate_from_url();
        assert_eq!(fresh.view(), View::Detail);
        assert_eq!(fresh.selected_index(), Some(1));
        assert_eq!(fresh.state().selected_song_title.as_deref(), Some("Mid"));
    }

    #[test]
    fn test_resize_preserves_selection_without_refilter() {
        let mut nav = navigator("");
        nav.resize(40);
        nav.update_query("a");
        nav.select_song(0, 0);
        let results = nav.results().to_vec();

        assert!(nav.resize(200).is_empty());
        assert_eq!(nav.panels(), Panels { list: true, detail: true, back: false });
        assert_eq!(nav.state().selected_song_title.as_deref(), Some("Alpha"));
        assert_eq!(nav.results(), results.as_slice());
    }

    #[test]
    fn test_replace_catalog_keeps_selection_by_title() {
        let mut nav = navigator("");
        nav.select_song(2, 0);
        let bigger = Catalog::from_songs(vec![
            Song::new("Aardvark", &["X"], ""),
            Song::new("Zeta", &["Amy"], ""),
        ]);
        nav.replace_catalog(bigger);
        assert_eq!(nav.selected_index(), Some(1));

        let effects = nav.replace_catalog(Catalog::default());
        assert_eq!(effects, vec![Effect::ResultsChanged, Effect::SetupAudio(None)]);
        assert!(nav.selected_song().is_none());
        assert_eq!(nav.view(), View::List);
    }

    #[test]
    fn test_dispatch_routes_actions() {
        let mut nav = navigator("");
        nav.dispatch(NavAction::UpdateQuery("zeta".into()));
        nav.dispatch(NavAction::SelectSong { index: 2, list_scroll: 3 });
        assert_eq!(nav.dispatch(NavAction::Back), vec![Effect::RestoreScroll(3)]);
        nav.dispatch(NavAction::ClearQuery);
        assert_eq!(nav.location(), "");
    }

    #[test]
    fn test_location_for() {
        let params = location_for(Some("Alpha"), Some("a:amy"));
        assert_eq!(params.to_query_string(), "?song=Alpha&search=a%3Aamy");
    }
}
