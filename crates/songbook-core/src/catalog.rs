//! Catalog Store — the loaded, title-sorted song list.
//!
//! The catalog is immutable once built; reloading replaces it wholesale.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, info, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CatalogError;
use crate::song::Song;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Parse a YAML catalog document and sort it by title.
    ///
    /// The top level must be a sequence of records; an empty document is an
    /// empty catalog. Entries that are not mappings are skipped.
    pub fn load(raw: &str) -> Result<Self, CatalogError> {
        let doc: Value = serde_yaml::from_str(raw)?;
        let items = match doc {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items,
            other => return Err(CatalogError::NotASequence(value_kind(&other))),
        };

        let mut songs = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match Song::from_yaml(item) {
                Some(song) => songs.push(song),
                None => warn!("catalog entry {} is not a record, skipping", idx),
            }
        }

        let catalog = Self::from_songs(songs);
        info!("catalog loaded: {} songs", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from already-normalized songs, applying the title sort.
    pub fn from_songs(mut songs: Vec<Song>) -> Self {
        // sort_by is stable: equal titles keep document order.
        songs.sort_by(|a, b| collate_titles(&a.title, &b.title));
        Self { songs }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Case-insensitive exact title lookup.
    ///
    /// Duplicate titles resolve to the first match in sorted order.
    pub fn find_by_title(&self, title: &str) -> Option<(usize, &Song)> {
        let wanted = title.to_lowercase();
        let found = self
            .songs
            .iter()
            .enumerate()
            .find(|(_, song)| song.has_title() && song.title.to_lowercase() == wanted);
        if found.is_none() {
            debug!("no song titled {:?}", title);
        }
        found
    }
}

/// Title ordering used by the catalog.
///
/// Titled songs come before untitled ones. Titles compare on their base
/// letters first (accents and case ignored), then accents (unaccented
/// first), then case (lowercase first), then the raw strings decide.
pub fn collate_titles(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let primary = fold_base(a).cmp(&fold_base(b));
    if primary != Ordering::Equal {
        return primary;
    }
    let accents = fold_case(a).cmp(&fold_case(b));
    if accents != Ordering::Equal {
        return accents;
    }
    // "abc" before "Abc": compare with case flipped so lowercase wins.
    let flip = |s: &str| -> String {
        s.nfd()
            .map(|c| {
                if c.is_lowercase() {
                    c.to_uppercase().next().unwrap_or(c)
                } else {
                    c.to_lowercase().next().unwrap_or(c)
                }
            })
            .collect()
    };
    flip(a).cmp(&flip(b)).then_with(|| a.cmp(b))
}

/// Lowercased, decomposed, with combining marks dropped: "Éclair" → "eclair".
fn fold_base(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercased and decomposed, marks kept, so "cote" < "coté".
fn fold_case(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// Catalog source — either an http(s) URL or a local file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
        }
    }
}

/// Read the raw catalog document from `source` and parse it.
pub async fn fetch_catalog(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    let raw = match source {
        CatalogSource::Path(path) => read_catalog_file(path).await?,
        CatalogSource::Url(url) => {
            debug!("fetching catalog from {}", url);
            let resp = reqwest::get(url.as_str()).await?.error_for_status()?;
            resp.text().await?
        }
    };
    Catalog::load(&raw)
}

async fn read_catalog_file(path: &Path) -> Result<String, CatalogError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
- title: Zeta
  artist: Amy
  lyrics: last letter
- title: Alpha
  artist: [Amy, Bob]
  lyrics: first letter
"#;

    fn titles(catalog: &Catalog) -> Vec<&str> {
        catalog.songs().iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_load_sorts_by_title() {
        let catalog = Catalog::load(SCENARIO).unwrap();
        assert_eq!(titles(&catalog), vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let catalog = Catalog::from_songs(vec![
            Song::new("banana", &[], ""),
            Song::new("Cherry", &[], ""),
            Song::new("apple", &[], ""),
        ]);
        assert_eq!(titles(&catalog), vec!["apple", "banana", "Cherry"]);
    }

    #[test]
    fn test_missing_titles_sort_last() {
        let catalog = Catalog::load(
            "- artist: Nobody\n- title: 'Zzz'\n- title: ''\n- title: Aaa\n",
        )
        .unwrap();
        assert_eq!(titles(&catalog), vec!["Aaa", "Zzz", "", ""]);
    }

    #[test]
    fn test_titles_beyond_bmp_still_before_untitled() {
        let catalog = Catalog::from_songs(vec![
            Song::new("", &[], ""),
            Song::new("\u{1F3B5} notes", &[], ""),
        ]);
        assert_eq!(titles(&catalog), vec!["\u{1F3B5} notes", ""]);
    }

    #[test]
    fn test_accented_titles_sort_by_base_letter() {
        let catalog = Catalog::from_songs(vec![
            Song::new("Zebra", &[], ""),
            Song::new("Éclair", &[], ""),
            Song::new("Fox", &[], ""),
            Song::new("über alles", &[], ""),
        ]);
        assert_eq!(titles(&catalog), vec!["Éclair", "Fox", "über alles", "Zebra"]);
    }

    #[test]
    fn test_unaccented_before_accented_on_base_tie() {
        assert_eq!(collate_titles("cote", "coté"), Ordering::Less);
        assert_eq!(collate_titles("Coté", "cote"), Ordering::Greater);
        assert_eq!(collate_titles("résumé", "Resume"), Ordering::Greater);
        // Precomposed and decomposed spellings differ only in the raw tie-break.
        assert_ne!(collate_titles("e\u{301}", "\u{e9}"), Ordering::Equal);
    }

    #[test]
    fn test_lowercase_first_on_case_tie() {
        assert_eq!(collate_titles("abc", "Abc"), Ordering::Less);
        assert_eq!(collate_titles("Abc", "abc"), Ordering::Greater);
        assert_eq!(collate_titles("Abc", "Abc"), Ordering::Equal);
    }

    #[test]
    fn test_find_by_title_case_insensitive() {
        let catalog = Catalog::load(SCENARIO).unwrap();
        let (idx, song) = catalog.find_by_title("ALPHA").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(song.title, "Alpha");
        assert!(catalog.find_by_title("Omega").is_none());
        assert!(catalog.find_by_title("").is_none());
    }

    #[test]
    fn test_duplicate_titles_first_in_document_order_wins() {
        let catalog = Catalog::load(
            "- title: Same\n  artist: First\n- title: same\n  artist: Second\n",
        )
        .unwrap();
        let (_, song) = catalog.find_by_title("SAME").unwrap();
        // "same" sorts before "Same" (lowercase first), so it is found first.
        assert_eq!(song.artists, vec!["Second"]);

        let catalog = Catalog::load(
            "- title: Same\n  artist: First\n- title: Same\n  artist: Second\n",
        )
        .unwrap();
        let (idx, song) = catalog.find_by_title("same").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(song.artists, vec!["First"]);
    }

    #[test]
    fn test_empty_document_is_empty_catalog() {
        assert!(Catalog::load("").unwrap().is_empty());
        assert!(Catalog::load("[]").unwrap().is_empty());
    }

    #[test]
    fn test_non_sequence_document_fails() {
        let err = Catalog::load("title: lonely").unwrap_err();
        assert!(matches!(err, CatalogError::NotASequence("mapping")));
    }

    #[test]
    fn test_malformed_document_fails() {
        let err = Catalog::load("- title: [unclosed").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(!err.is_load_error());
    }

    #[test]
    fn test_source_parse() {
        assert_eq!(
            CatalogSource::parse("https://example.com/songs.yaml"),
            CatalogSource::Url("https://example.com/songs.yaml".into())
        );
        assert_eq!(
            CatalogSource::parse("songs.yaml"),
            CatalogSource::Path(PathBuf::from("songs.yaml"))
        );
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("songs.yaml");
        std::fs::write(&path, SCENARIO).unwrap();
        let catalog = fetch_catalog(&CatalogSource::Path(path)).await.unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_missing_file_is_read_error() {
        let err = fetch_catalog(&CatalogSource::Path("/no/such/songs.yaml".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.is_load_error());
    }
}
