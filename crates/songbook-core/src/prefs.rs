//! Durable key-value preferences (a small JSON object on disk).
//!
//! The only key the app uses today is `mode`, the display theme.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Preference key for the display theme.
pub const MODE_KEY: &str = "mode";

pub struct PrefStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PrefStore {
    /// Open the store at `path`. A missing or unreadable file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("ignoring corrupt preferences {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` and write the whole store through to disk.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Only an explicit `light` switches away from the dark default.
    pub fn load(store: &PrefStore) -> Self {
        match store.get(MODE_KEY) {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn save(self, store: &mut PrefStore) -> anyhow::Result<()> {
        store.set(MODE_KEY, self.label())
    }
}
