use std::path::PathBuf;

const APP_DIR: &str = "songbook";

/// Environment override for the config directory.
pub const CONFIG_DIR_ENV: &str = "SONGBOOK_CONFIG_DIR";
/// Environment override for the data directory (logs, prefs, session).
pub const DATA_DIR_ENV: &str = "SONGBOOK_DATA_DIR";

pub fn data_dir() -> PathBuf {
    if let Some(dir) = env_dir(DATA_DIR_ENV) {
        return dir;
    }

    // On macOS and Linux, use ~/.local/share/songbook/ (XDG standard)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(temp_dir)
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    if let Some(dir) = env_dir(CONFIG_DIR_ENV) {
        return dir;
    }

    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolve an external player command to an executable path.
///
/// Absolute or relative paths containing a separator are used as-is when they
/// exist. Bare names are looked up beside the current executable, then on PATH.
pub fn find_binary(command: &str) -> Option<PathBuf> {
    let as_path = PathBuf::from(command);
    if as_path.components().count() > 1 {
        return as_path.exists().then_some(as_path);
    }

    let names = binary_names(command);
    find_beside_exe(&names).or_else(|| find_on_path(&names))
}

#[cfg(unix)]
fn binary_names(command: &str) -> Vec<String> {
    vec![command.to_string()]
}

#[cfg(windows)]
fn binary_names(command: &str) -> Vec<String> {
    if command.ends_with(".exe") {
        vec![command.to_string()]
    } else {
        vec![format!("{command}.exe"), command.to_string()]
    }
}

fn find_beside_exe(names: &[String]) -> Option<PathBuf> {
    let current_exe = std::env::current_exe().ok()?;
    let dir = current_exe.parent()?;
    for name in names {
        let p = dir.join(name);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn find_on_path(names: &[String]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for name in names {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_binary_missing_path() {
        assert!(find_binary("/definitely/not/here/player").is_none());
    }

    #[test]
    fn test_find_binary_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("player");
        std::fs::write(&bin, b"").unwrap();
        let found = find_binary(bin.to_str().unwrap());
        assert_eq!(found.as_deref(), Some(bin.as_path()));
    }
}
