//! Filter Engine — maps (catalog, query, lyric flag) to the matching songs.
//!
//! Matching is a case-insensitive substring test. A query starting with `a:`
//! searches artist names only; its payload is trimmed, the general query is
//! not. Results keep catalog order.

use crate::catalog::Catalog;
use crate::song::Song;

/// Prefix that switches a query into artist-only mode.
pub const ARTIST_PREFIX: &str = "a:";

/// A normalized (lowercased) query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `a:` mode; the needle is trimmed.
    Artist(String),
    /// Title, artist, and optionally lyrics; the needle is untrimmed.
    General(String),
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        match lowered.strip_prefix(ARTIST_PREFIX) {
            Some(rest) => Self::Artist(rest.trim().to_string()),
            None => Self::General(lowered),
        }
    }

    /// An empty needle in either mode means "no filter".
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Artist(needle) | Self::General(needle) => needle.is_empty(),
        }
    }

    /// Build the query `selectArtist` writes into the search box.
    pub fn for_artist(name: &str) -> String {
        format!("{ARTIST_PREFIX}{name}")
    }

    pub fn matches(&self, song: &Song, search_lyrics: bool) -> bool {
        if self.is_empty() {
            return true;
        }
        match self {
            Self::Artist(needle) => artist_matches(song, needle),
            Self::General(needle) => {
                contains(&song.title, needle)
                    || artist_matches(song, needle)
                    || (search_lyrics && contains(&song.lyrics, needle))
            }
        }
    }
}

/// Indices (into `catalog`) of the songs matching `query`, in catalog order.
pub fn filter(catalog: &Catalog, query: &str, search_lyrics: bool) -> Vec<usize> {
    let parsed = Query::parse(query);
    catalog
        .songs()
        .iter()
        .enumerate()
        .filter(|(_, song)| parsed.matches(song, search_lyrics))
        .map(|(idx, _)| idx)
        .collect()
}

/// Like [`filter`] but returns the songs themselves.
pub fn filter_songs<'a>(catalog: &'a Catalog, query: &str, search_lyrics: bool) -> Vec<&'a Song> {
    filter(catalog, query, search_lyrics)
        .into_iter()
        .filter_map(|idx| catalog.get(idx))
        .collect()
}

fn artist_matches(song: &Song, needle: &str) -> bool {
    song.artists.iter().any(|name| contains(name, needle))
}

// Absent (empty) fields never match.
fn contains(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Catalog {
        Catalog::from_songs(vec![
            Song::new("Zeta", &["Amy"], "the quick brown fox"),
            Song::new("Alpha", &["Amy", "Bob"], "lorem ipsum"),
        ])
    }

    fn titles(songs: Vec<&Song>) -> Vec<&str> {
        songs.into_iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!(Query::parse("A:  Bob "), Query::Artist("bob".into()));
        assert_eq!(Query::parse(" Zeta "), Query::General(" zeta ".into()));
        assert_eq!(Query::parse("xa:bob"), Query::General("xa:bob".into()));
    }

    #[test]
    fn test_empty_query_returns_catalog_in_order() {
        let catalog = scenario();
        assert_eq!(filter(&catalog, "", false), vec![0, 1]);
    }

    #[test]
    fn test_artist_mode() {
        let catalog = scenario();
        assert_eq!(titles(filter_songs(&catalog, "a:bob", false)), vec!["Alpha"]);
        assert_eq!(titles(filter_songs(&catalog, "a: AMY ", false)), vec!["Alpha", "Zeta"]);
        assert_eq!(filter(&catalog, "a:", false), vec![0, 1]);
    }

    #[test]
    fn test_artist_mode_ignores_title() {
        let catalog = scenario();
        assert!(filter(&catalog, "a:zeta", false).is_empty());
    }

    #[test]
    fn test_general_title_match() {
        let catalog = scenario();
        assert_eq!(titles(filter_songs(&catalog, "zeta", false)), vec!["Zeta"]);
        assert_eq!(titles(filter_songs(&catalog, "ZET", false)), vec!["Zeta"]);
    }

    #[test]
    fn test_general_query_is_not_trimmed() {
        let catalog = scenario();
        assert!(filter(&catalog, " zeta", false).is_empty());
    }

    #[test]
    fn test_general_artist_match() {
        let catalog = scenario();
        assert_eq!(titles(filter_songs(&catalog, "bo", false)), vec!["Alpha"]);
    }

    #[test]
    fn test_lyrics_only_with_flag() {
        let catalog = scenario();
        assert!(filter(&catalog, "brown fox", false).is_empty());
        assert_eq!(titles(filter_songs(&catalog, "brown fox", true)), vec!["Zeta"]);
    }

    #[test]
    fn test_missing_fields_never_match() {
        let catalog = Catalog::from_songs(vec![Song::new("", &[], "")]);
        assert!(filter(&catalog, "x", true).is_empty());
        assert!(filter(&catalog, "a:x", false).is_empty());
        // ...but an empty query is no filter at all.
        assert_eq!(filter(&catalog, "", false), vec![0]);
        assert_eq!(filter(&catalog, "a:  ", false), vec![0]);
    }

    #[test]
    fn test_every_title_substring_matches() {
        let catalog = scenario();
        for (idx, song) in catalog.songs().iter().enumerate() {
            let folded = song.title.to_lowercase();
            for start in 0..folded.len() {
                for end in start..=folded.len() {
                    let q = &folded[start..end];
                    assert!(filter(&catalog, q, false).contains(&idx), "{q:?}");
                }
            }
        }
    }

    #[test]
    fn test_for_artist() {
        assert_eq!(Query::for_artist("Bob"), "a:Bob");
    }
}
