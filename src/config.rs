//! Configuration file support.
//!
//! The browser build reads the configuration from a JSON `<script>` element in
//! the page; the native binary reads it from the user config directory or a
//! path given on the command line. Every field has a default, so a partial
//! file only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::effects::EffectsSettings;
use crate::gallery::DecodePolicy;
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level, as `console_log` wants it.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// General preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Lightbox keybindings
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Typewriter, reveal, navbar and autoplay settings
    #[serde(default)]
    pub effects: EffectsSettings,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// General preferences section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Which decode completions may swap the lightbox image
    #[serde(default)]
    pub decode_policy: DecodePolicy,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: Preferences::default(),
            keybindings: KeyBindings::default(),
            effects: EffectsSettings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if let Some((key, first, second)) = config.keybindings.find_conflict() {
            return Err(ConfigError::KeyConflict {
                key: key.name(),
                first,
                second,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "folio-config.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("folio").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("folio")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_file(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Two actions share one key, so one of them is unreachable
    #[error("Key '{key}' is bound to both {first} and {second}")]
    KeyConflict {
        key: String,
        first: String,
        second: String,
    },

    /// I/O error when reading the config file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::Key;

    #[test]
    fn test_default_roundtrip() {
        let config = AppConfig::default();
        let json = config.to_json().unwrap();
        let parsed = AppConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{
            "preferences": { "decode_policy": "apply_all" },
            "keybindings": { "close": "q" },
            "effects": { "typewriter": { "phrases": ["Hello"], "loop_phrases": false } }
        }"#;
        let config = AppConfig::from_json(json).unwrap();

        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.log_level, LogLevel::Info);
        assert_eq!(config.preferences.decode_policy, DecodePolicy::ApplyAll);
        assert_eq!(config.keybindings.close, Key::Char('q'));
        assert_eq!(config.keybindings.next, Key::ArrowRight);
        assert_eq!(config.effects.typewriter.phrases, vec!["Hello".to_string()]);
        assert!(!config.effects.typewriter.loop_phrases);
        assert_eq!(
            config.effects.typewriter.type_delay_ms,
            crate::constants::timing::TYPE_DELAY_MS
        );
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_version_too_new() {
        let result = AppConfig::from_json(r#"{"version": 99}"#);
        assert!(matches!(
            result,
            Err(ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            })
        ));
    }

    #[test]
    fn test_conflicting_keybindings_rejected() {
        let result = AppConfig::from_json(r#"{"keybindings": {"next": "Escape"}}"#);
        match result {
            Err(ConfigError::KeyConflict { key, first, second }) => {
                assert_eq!(key, "Escape");
                assert_eq!(first, "Close gallery");
                assert_eq!(second, "Next image");
            }
            other => panic!("expected a key conflict, got {:?}", other),
        }

        // Swapping two keys is fine
        let config = AppConfig::from_json(
            r#"{"keybindings": {"previous": "ArrowRight", "next": "ArrowLeft"}}"#,
        )
        .unwrap();
        assert_eq!(config.keybindings.find_conflict(), None);
    }

    #[test]
    fn test_log_level_names() {
        let config = AppConfig::from_json(r#"{"preferences": {"log_level": "debug"}}"#).unwrap();
        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert_eq!(
            config.preferences.log_level.to_level_filter(),
            log::LevelFilter::Debug
        );
        assert!(AppConfig::from_json(r#"{"preferences": {"log_level": "loud"}}"#).is_err());
    }
}
