//! Application configuration: bindings and sounds
//!
//! Stored in `~/.config/keychime/config.yaml`:
//!
//! ```yaml
//! bindings:
//!   - key: "ctrl+x"
//!     action: toast
//!   - key: { meta: true, key: k }
//!     action: palette
//! sounds:
//!   volume: 0.25
//!   sounds:
//!     click: click.wav
//!     hover: hover.wav
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::keymap::{ComboDescriptor, KeyCombo, KeymapError};
use crate::sound::SoundConfig;

/// Binding that ships with no user config
pub const DEFAULT_BINDING: (&str, &str) = ("ctrl+x", "toast");

/// A single binding entry from YAML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub key: ComboDescriptor,
    pub action: String,
}

/// Root structure of a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bindings")]
    pub bindings: Vec<BindingConfig>,
    #[serde(default)]
    pub sounds: SoundConfig,
}

fn default_bindings() -> Vec<BindingConfig> {
    let (key, action) = DEFAULT_BINDING;
    vec![BindingConfig {
        key: ComboDescriptor::from(key),
        action: action.to_string(),
    }]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
            sounds: SoundConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match load_config_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Canonical combo and action name for every binding, in file order
    ///
    /// Fails on the first entry whose key cannot be parsed strictly.
    pub fn binding_actions(&self) -> Result<Vec<(KeyCombo, String)>, ConfigError> {
        self.bindings
            .iter()
            .map(|binding| -> Result<(KeyCombo, String), ConfigError> {
                let combo = KeyCombo::from_descriptor(&binding.key)?;
                Ok((combo, binding.action.clone()))
            })
            .collect()
    }

    /// Save config to a path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

/// Load a config file strictly
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    parse_config_yaml(&content)
}

/// Parse config from a YAML string, validating every binding key
pub fn parse_config_yaml(yaml: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.binding_actions()?;
    Ok(config)
}

/// Errors that can occur when loading configuration or event scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    InvalidKey(String),
}

impl From<KeymapError> for ConfigError {
    fn from(err: KeymapError) -> Self {
        match err {
            KeymapError::InvalidKey(k) => ConfigError::InvalidKey(k),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Trigger;

    #[test]
    fn test_default_binds_ctrl_x() {
        let config = AppConfig::default();
        let actions = config.binding_actions().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].0.as_str(), "ctrl+x");
        assert_eq!(actions[0].1, "toast");
    }

    #[test]
    fn test_parse_both_key_forms() {
        let yaml = r#"
bindings:
  - key: "Shift+Ctrl+I"
    action: inspect
  - key: { meta: true, key: K }
    action: palette
sounds:
  volume: 0.5
  sounds:
    click: click.wav
"#;
        let config = parse_config_yaml(yaml).unwrap();
        let actions = config.binding_actions().unwrap();
        assert_eq!(actions[0].0.as_str(), "ctrl+shift+i");
        assert_eq!(actions[1].0.as_str(), "meta+k");
        assert_eq!(config.sounds.volume, 0.5);
        assert_eq!(config.sounds.resource(Trigger::Click), "click.wav");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config_yaml("sounds: { disabled: true }").unwrap();
        assert_eq!(config.bindings, default_bindings());
        assert!(config.sounds.disabled);
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let yaml = "bindings:\n  - key: \"\"\n    action: nothing\n";
        assert!(matches!(
            parse_config_yaml(yaml),
            Err(ConfigError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_unknown_trigger_is_a_parse_error() {
        let yaml = "sounds:\n  sounds:\n    boop: x.wav\n";
        assert!(matches!(parse_config_yaml(yaml), Err(ConfigError::Parse(_))));
    }
}
