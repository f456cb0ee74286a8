//! End-to-end: YAML catalog → filter → navigator → history.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use songbook_core::filter::filter_songs;
use songbook_core::{
    Catalog, Effect, History, MemoryHistory, NavAction, Navigator, Panels, QueryParams, View,
};

const CATALOG: &str = r#"
- title: Zeta
  artist: Amy
  lyrics: |
    Zeta goes last
    in every list
- title: Alpha
  artist:
    - Amy
    - Bob
  lyrics: Alpha goes first
  path: audio/alpha.ogg
- artist: Anonymous
  lyrics: nobody named this one
- title: Hey Jude & Friends
  artist: Quartet
  lyrics: take a sad song
"#;

fn titles(songs: Vec<&songbook_core::Song>) -> Vec<String> {
    songs.into_iter().map(|s| s.title.clone()).collect()
}

#[test]
fn scenario_sort_and_filter() {
    let catalog = Catalog::load(CATALOG).expect("catalog should parse");
    assert_eq!(
        titles(catalog.songs().iter().collect()),
        vec!["Alpha", "Hey Jude & Friends", "Zeta", ""]
    );
    assert_eq!(titles(filter_songs(&catalog, "a:bob", false)), vec!["Alpha"]);
    assert_eq!(titles(filter_songs(&catalog, "zeta", false)), vec!["Zeta"]);
    assert_eq!(filter_songs(&catalog, "", false).len(), catalog.len());
}

#[test]
fn lyrics_match_requires_flag() {
    let catalog = Catalog::load(CATALOG).unwrap();
    assert!(filter_songs(&catalog, "sad song", false).is_empty());
    assert_eq!(
        titles(filter_songs(&catalog, "sad song", true)),
        vec!["Hey Jude & Friends"]
    );
}

#[test]
fn artist_mode_matches_exactly_the_artist_set() {
    let catalog = Catalog::load(CATALOG).unwrap();
    for needle in ["amy", " Am", "b", "quartet", "x"] {
        let wanted = needle.trim().to_lowercase();
        let expected: Vec<String> = catalog
            .songs()
            .iter()
            .filter(|s| s.artists.iter().any(|a| a.to_lowercase().contains(&wanted)))
            .map(|s| s.title.clone())
            .collect();
        let got = titles(filter_songs(&catalog, &format!("a:{needle}"), false));
        assert_eq!(got, expected, "needle {needle:?}");
    }
}

#[test]
fn select_then_reload_reproduces_detail_view() {
    let catalog = Catalog::load(CATALOG).unwrap();
    let mut nav = Navigator::new(catalog.clone(), MemoryHistory::default());
    let (idx, _) = catalog.find_by_title("hey jude & friends").unwrap();
    nav.select_song(idx, 0);

    let url = nav.location();
    assert_eq!(url, "?song=Hey%20Jude%20%26%20Friends");

    let mut reloaded = Navigator::new(catalog, MemoryHistory::new(QueryParams::parse(&url)));
    reloaded.hydrate_from_url();
    assert_eq!(reloaded.view(), View::Detail);
    assert_eq!(reloaded.selected_index(), Some(idx));
}

#[test]
fn browser_back_and_forward_rehydrate() {
    let catalog = Catalog::load(CATALOG).unwrap();
    let mut nav = Navigator::new(catalog, MemoryHistory::default()).with_breakpoint(100);
    nav.resize(80);

    let popstates = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&popstates);
    nav.history_mut().on_change(Box::new(move |_: &QueryParams| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    nav.dispatch(NavAction::UpdateQuery("a".into()));
    nav.dispatch(NavAction::SelectSong { index: 0, list_scroll: 4 });
    assert_eq!(nav.panels(), Panels { list: false, detail: true, back: true });

    // Browser back: location loses the song, state follows on hydrate.
    assert!(nav.history_mut().go_back());
    assert_eq!(nav.dispatch(NavAction::HydrateFromUrl), vec![Effect::SetupAudio(None)]);
    assert_eq!(nav.view(), View::List);
    assert_eq!(nav.state().query, "a");

    // Browser forward: the song comes back.
    assert!(nav.history_mut().go_forward());
    let effects = nav.dispatch(NavAction::HydrateFromUrl);
    assert_eq!(effects, vec![Effect::SetupAudio(Some("audio/alpha.ogg".into()))]);
    assert_eq!(nav.view(), View::Detail);
    assert_eq!(popstates.load(Ordering::SeqCst), 2);
}

#[test]
fn back_twice_from_list_changes_nothing() {
    let catalog = Catalog::load(CATALOG).unwrap();
    let mut nav = Navigator::new(catalog, MemoryHistory::default());
    nav.update_query("zeta");
    let location = nav.location();
    let entries = nav.history().len();

    assert!(nav.dispatch(NavAction::Back).is_empty());
    assert!(nav.dispatch(NavAction::Back).is_empty());
    assert_eq!(nav.location(), location);
    assert_eq!(nav.history().len(), entries);
    assert_eq!(nav.history().read(), QueryParams::parse(&location));
}

#[test]
fn narrow_to_wide_keeps_selection() {
    let catalog = Catalog::load(CATALOG).unwrap();
    let mut nav = Navigator::new(catalog, MemoryHistory::default()).with_breakpoint(100);
    nav.resize(50);
    nav.select_song(2, 0);
    let results = nav.results().to_vec();

    nav.dispatch(NavAction::Resize(140));
    assert_eq!(nav.panels(), Panels { list: true, detail: true, back: false });
    assert_eq!(nav.state().selected_song_title.as_deref(), Some("Zeta"));
    assert_eq!(nav.results(), results.as_slice());

    nav.dispatch(NavAction::Resize(50));
    assert_eq!(nav.panels(), Panels { list: false, detail: true, back: true });
}
