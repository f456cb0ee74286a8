use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the song catalog comes from — either an https:// URL or a local file path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_source")]
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Terminal width (columns) at or above which list and lyrics are shown side by side.
    #[serde(default = "default_breakpoint")]
    pub breakpoint: u16,
    /// Animate entering and leaving the lyrics view.
    #[serde(default = "default_animations")]
    pub animations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Player command; resolved beside the executable, then on PATH.
    #[serde(default = "default_player")]
    pub player: String,
    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
}

/// User-configurable locations for persisted state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Key-value preference store (display theme).
    #[serde(default = "default_prefs_file")]
    pub prefs_file: PathBuf,
    /// Last location, restored on the next start.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_restore")]
    pub restore: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: default_breakpoint(),
            animations: default_animations(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            args: default_player_args(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prefs_file: default_prefs_file(),
            session_file: default_session_file(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            restore: default_restore(),
        }
    }
}

fn default_catalog_source() -> String {
    "songs.yaml".to_string()
}

fn default_breakpoint() -> u16 {
    100
}

fn default_animations() -> bool {
    true
}

fn default_player() -> String {
    "mpv".to_string()
}

fn default_player_args() -> Vec<String> {
    vec!["--no-video".to_string(), "--really-quiet".to_string()]
}

fn default_prefs_file() -> PathBuf {
    platform::data_dir().join("prefs.json")
}

fn default_session_file() -> PathBuf {
    platform::data_dir().join("session.json")
}

fn default_restore() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog.source, "songs.yaml");
        assert_eq!(config.layout.breakpoint, 100);
        assert!(config.layout.animations);
        assert_eq!(config.audio.player, "mpv");
        assert!(config.session.restore);
        assert!(config.paths.prefs_file.ends_with("prefs.json"));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.layout.breakpoint, 100);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[layout]\nbreakpoint = 80\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.layout.breakpoint, 80);
        assert!(config.layout.animations);
        assert_eq!(config.catalog.source, "songs.yaml");
    }
}
