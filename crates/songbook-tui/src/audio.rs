//! Audio widget backend — plays a song's audio resource with an external player.
//!
//! `setup` points the widget at a resource (or at nothing); `toggle` starts
//! or stops the player process. Relative paths resolve against the catalog's
//! directory; http(s) resources are handed to the player unchanged.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use songbook_core::platform;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("this song has no audio")]
    NoSource,

    #[error("audio file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("audio player `{0}` not found")]
    PlayerNotFound(String),

    #[error("cannot start audio player: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("audio player failed ({0})")]
    Exited(ExitStatus),

    #[error("lost track of audio player: {0}")]
    Poll(#[source] std::io::Error),
}

/// What the audio line shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioStatus {
    /// Resource of the selected song, as written in the catalog.
    pub resource: Option<String>,
    pub playing: bool,
}

pub struct AudioPlayer {
    player: String,
    args: Vec<String>,
    base_dir: Option<PathBuf>,
    resource: Option<String>,
    child: Option<Child>,
}

impl AudioPlayer {
    pub fn new(player: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            player: player.into(),
            args,
            base_dir: None,
            resource: None,
            child: None,
        }
    }

    /// Directory relative resources resolve against.
    pub fn set_base_dir(&mut self, dir: Option<PathBuf>) {
        self.base_dir = dir;
    }

    /// Point the widget at `resource`. Stops playback when the resource changes.
    pub async fn setup(&mut self, resource: Option<String>) {
        if self.resource == resource {
            return;
        }
        self.stop().await;
        debug!("audio: source -> {:?}", resource);
        self.resource = resource;
    }

    pub fn status(&self) -> AudioStatus {
        AudioStatus {
            resource: self.resource.clone(),
            playing: self.child.is_some(),
        }
    }

    /// Start playback, or stop it if already playing. Returns whether it is
    /// playing afterwards.
    pub async fn toggle(&mut self) -> Result<bool, AudioError> {
        if self.child.is_some() {
            self.stop().await;
            return Ok(false);
        }
        let resource = self.resource.as_deref().ok_or(AudioError::NoSource)?;
        let target = resolve_resource(resource, self.base_dir.as_deref())?;
        let binary = platform::find_binary(&self.player)
            .ok_or_else(|| AudioError::PlayerNotFound(self.player.clone()))?;

        let child = Command::new(&binary)
            .args(&self.args)
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(AudioError::Spawn)?;
        info!("audio: playing {} (pid {:?})", target, child.id());
        self.child = Some(child);
        Ok(true)
    }

    pub async fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                warn!("audio: failed to stop player: {}", e);
            }
        }
    }

    /// Forget a player that exited on its own.
    ///
    /// `None` while it is still running (or nothing plays); otherwise how it
    /// ended, with a non-zero exit reported as [`AudioError::Exited`].
    pub fn reap(&mut self) -> Option<Result<(), AudioError>> {
        let outcome = match self.child.as_mut()?.try_wait() {
            Ok(None) => return None,
            Ok(Some(status)) if status.success() => {
                debug!("audio: player finished");
                Ok(())
            }
            Ok(Some(status)) => {
                warn!("audio: player exited with {}", status);
                Err(AudioError::Exited(status))
            }
            Err(e) => {
                warn!("audio: cannot poll player: {}", e);
                Err(AudioError::Poll(e))
            }
        };
        self.child = None;
        Some(outcome)
    }
}

/// Turn a catalog resource into something the player can open.
pub fn resolve_resource(resource: &str, base_dir: Option<&Path>) -> Result<String, AudioError> {
    let resource = resource.trim();
    if resource.is_empty() {
        return Err(AudioError::NoSource);
    }
    if resource.starts_with("http://") || resource.starts_with("https://") {
        return Ok(resource.to_string());
    }
    let path = Path::new(resource);
    let full = match base_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    };
    if !full.exists() {
        return Err(AudioError::MissingFile(full));
    }
    Ok(full.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_pass_through() {
        let got = resolve_resource("https://cdn.example.org/a.mp3", None).unwrap();
        assert_eq!(got, "https://cdn.example.org/a.mp3");
    }

    #[test]
    fn test_relative_resolves_against_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("audio")).unwrap();
        std::fs::write(dir.path().join("audio/zeta.mp3"), b"").unwrap();

        let got = resolve_resource("audio/zeta.mp3", Some(dir.path())).unwrap();
        assert_eq!(PathBuf::from(got), dir.path().join("audio/zeta.mp3"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_resource("nope.ogg", Some(dir.path())).unwrap_err();
        assert!(matches!(err, AudioError::MissingFile(_)));
    }

    #[tokio::test]
    async fn test_toggle_without_source() {
        let mut player = AudioPlayer::new("definitely-not-a-player", Vec::new());
        player.setup(None).await;
        assert!(matches!(player.toggle().await, Err(AudioError::NoSource)));
        assert!(!player.status().playing);
    }

    /// Poll `reap` until the player has exited.
    #[cfg(unix)]
    async fn wait_reaped(player: &mut AudioPlayer) -> Result<(), AudioError> {
        for _ in 0..200 {
            if let Some(outcome) = player.reap() {
                return outcome;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("player never exited");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_player_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let mut player = AudioPlayer::new("false", Vec::new());
        player.set_base_dir(Some(dir.path().to_path_buf()));
        player.setup(Some("a.mp3".into())).await;

        assert!(player.toggle().await.unwrap());
        let outcome = wait_reaped(&mut player).await;
        assert!(matches!(outcome, Err(AudioError::Exited(status)) if !status.success()));
        assert!(!player.status().playing);
        assert!(player.reap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_player_finishing_cleanly_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let mut player = AudioPlayer::new("true", Vec::new());
        player.set_base_dir(Some(dir.path().to_path_buf()));
        player.setup(Some("a.mp3".into())).await;

        assert!(player.toggle().await.unwrap());
        assert!(wait_reaped(&mut player).await.is_ok());
        assert!(!player.status().playing);
    }

    #[tokio::test]
    async fn test_setup_changes_resource() {
        let mut player = AudioPlayer::new("mpv", Vec::new());
        player.setup(Some("a.mp3".into())).await;
        assert_eq!(player.status().resource.as_deref(), Some("a.mp3"));
        player.setup(None).await;
        assert_eq!(player.status(), AudioStatus::default());
    }
}
