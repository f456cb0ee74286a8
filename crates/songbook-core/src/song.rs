//! Song record and ingestion-time normalization.
//!
//! Catalog documents are loose: `artist` may be a single name or a list of
//! names, scalars may be numbers, and any field may be missing. Everything is
//! coerced into one shape here so no consumer ever re-checks the raw types.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Number of lyric words shown in list previews.
const PREVIEW_WORDS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Human-facing identifier; empty when the record had no title.
    pub title: String,
    /// Ordered artist names, never containing empty strings.
    pub artists: Vec<String>,
    pub lyrics: String,
    /// Audio resource for the playback widget.
    pub path: Option<String>,
}

impl Song {
    pub fn new(title: impl Into<String>, artists: &[&str], lyrics: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artists: artists
                .iter()
                .filter(|a| !a.is_empty())
                .map(|a| a.to_string())
                .collect(),
            lyrics: lyrics.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Normalize one raw catalog record. Returns `None` for non-mapping entries.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        let map = match value {
            Value::Tagged(tagged) => return Self::from_yaml(&tagged.value),
            Value::Mapping(map) => map,
            _ => return None,
        };

        Some(Self {
            title: map.get("title").and_then(scalar_string).unwrap_or_default(),
            artists: map.get("artist").map(artist_names).unwrap_or_default(),
            lyrics: map.get("lyrics").and_then(scalar_string).unwrap_or_default(),
            path: map
                .get("path")
                .and_then(scalar_string)
                .filter(|p| !p.is_empty()),
        })
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Artist names joined for display.
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }

    /// The first few lyric words followed by an ellipsis.
    pub fn preview(&self) -> String {
        let words: Vec<&str> = self.lyrics.split_whitespace().take(PREVIEW_WORDS).collect();
        format!("{}...", words.join(" "))
    }

    pub fn has_audio(&self) -> bool {
        self.path.is_some()
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

/// Coerce a scalar-or-sequence `artist` field into an ordered list of names.
fn artist_names(value: &Value) -> Vec<String> {
    let names: Vec<String> = match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_string).collect(),
        Value::Tagged(tagged) => return artist_names(&tagged.value),
        other => scalar_string(other).into_iter().collect(),
    };
    names.into_iter().filter(|n| !n.is_empty()).collect()
}
