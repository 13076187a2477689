use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "prof-finder";
const HISTORY_FILENAME: &str = "history.json";
const CONFIG_FILENAME: &str = "config.toml";
const LOG_DIR: &str = "logs";

/// Platform data directory for this application
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Failed to get platform data directory")?;
    Ok(base.join(APP_DIR))
}

/// Default location of the persisted conversation
pub fn default_history_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(HISTORY_FILENAME))
}

/// Default location of `config.toml`
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Directory for the TUI log files
pub fn log_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_DIR))
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&Path>) -> String {
    let home_from_env = env::var_os("HOME").map(PathBuf::from);
    let home = home_override.or(home_from_env.as_deref());

    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        return if rest.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", rest.display())
        };
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_share_app_dir() {
        // Platform dirs may be unavailable in minimal CI containers
        if let (Ok(history), Ok(logs)) = (default_history_path(), log_dir()) {
            assert!(history.ends_with("prof-finder/history.json"));
            assert!(logs.ends_with("prof-finder/logs"));
        }
        if let Ok(config) = default_config_path() {
            assert!(config.ends_with("prof-finder/config.toml"));
        }
    }

    #[test]
    fn test_format_path_with_tilde() {
        let home = Path::new("/home/testuser");

        let path = PathBuf::from("/home/testuser/.local/share/prof-finder/history.json");
        assert_eq!(
            format_path_with_tilde_internal(&path, Some(home)),
            "~/.local/share/prof-finder/history.json"
        );

        assert_eq!(format_path_with_tilde_internal(home, Some(home)), "~");

        // Path not under home
        let other = PathBuf::from("/opt/prof-finder/history.json");
        assert_eq!(
            format_path_with_tilde_internal(&other, Some(home)),
            "/opt/prof-finder/history.json"
        );

        // Sibling directory sharing a prefix is not under home
        let sibling = PathBuf::from("/home/testuser2/file");
        assert_eq!(format_path_with_tilde_internal(&sibling, Some(home)), "/home/testuser2/file");
    }
}
