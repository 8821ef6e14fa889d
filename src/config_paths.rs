//! Centralized configuration paths for keychime
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/keychime/`
//! - Windows: `%APPDATA%\keychime\`
//!
//! This module is the single source of truth for config paths.

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "keychime";

/// Base config directory for keychime
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/keychime`
///   - Else: `~/.config/keychime`
///
/// Windows:
///   - `%APPDATA%\keychime`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/keychime/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/keychime/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Ensure the logs dir (and the config dir above it) exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create directory {}: {}", logs.display(), e))?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_ensure_logs_dir_creates_config_dir_too() {
        let tmp = tempfile::tempdir().unwrap();
        env::set_var("XDG_CONFIG_HOME", tmp.path());

        let logs = ensure_logs_dir().unwrap();

        assert_eq!(logs, tmp.path().join(APP_DIR).join("logs"));
        assert!(logs.is_dir());
        assert!(tmp.path().join(APP_DIR).is_dir());
        env::remove_var("XDG_CONFIG_HOME");
    }
}
