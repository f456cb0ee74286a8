//! UI session persistence — where the user was when they quit.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSessionState {
    /// Query string of the last location, e.g. `?song=Alpha&search=a%3Aamy`.
    #[serde(default)]
    pub last_location: String,
    #[serde(default)]
    pub focused_component: String,
    #[serde(default = "default_keys_bar")]
    pub show_keys_bar: bool,
}

fn default_keys_bar() -> bool {
    true
}

impl Default for UiSessionState {
    fn default() -> Self {
        Self {
            last_location: String::new(),
            focused_component: String::new(),
            show_keys_bar: default_keys_bar(),
        }
    }
}

pub fn load_ui_session_state(path: &Path) -> UiSessionState {
    let Ok(content) = std::fs::read_to_string(path) else {
        return UiSessionState::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

pub fn save_ui_session_state(path: &Path, state: &UiSessionState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

/// Pick the starting location: an explicit one wins, then the saved session.
pub fn initial_location(explicit: Option<&str>, restore: bool, saved: &UiSessionState) -> String {
    match explicit {
        Some(location) => location.to_string(),
        None if restore => saved.last_location.clone(),
        None => String::new(),
    }
}
