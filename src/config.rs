//! Client configuration.
//!
//! Endpoints, the request timeout, user-facing messages and the shortcut
//! table can all be overridden with a JSON document. In the browser the
//! document is read from `localStorage`; anything missing falls back to the
//! defaults the labeling server expects.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{self, endpoint};
use crate::keybindings::KeyBindings;

/// Log level setting for the client.
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
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Client configuration that can be stored and restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Server endpoint paths
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Timeout for each label request, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Page size used when opening the labeled-images view
    #[serde(default = "default_labeled_per_page")]
    pub labeled_per_page: u32,

    /// Texts shown in alerts and confirmations
    #[serde(default)]
    pub messages: Messages,

    /// Shortcut table
    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_request_timeout_ms() -> u64 {
    constants::DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_labeled_per_page() -> u32 {
    constants::DEFAULT_LABELED_PER_PAGE
}

/// Paths of the server endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub save: String,
    pub delete: String,
    pub clear_labeling: String,
    pub editing_labels: String,
    pub next: String,
    pub labeled: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            save: endpoint::SAVE.to_string(),
            delete: endpoint::DELETE.to_string(),
            clear_labeling: endpoint::CLEAR_LABELING.to_string(),
            editing_labels: endpoint::EDITING_LABELS.to_string(),
            next: endpoint::NEXT.to_string(),
            labeled: endpoint::LABELED.to_string(),
        }
    }
}

/// User-facing texts, in the language of the labeling pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub save_failed: String,
    pub saved: String,
    pub confirm_delete: String,
    pub delete_failed: String,
    pub confirm_clear: String,
    pub clear_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            save_failed: "Не удается сохранить разметку для изображения!".to_string(),
            saved: "Разметка для изображения сохранена!".to_string(),
            confirm_delete: "Вы уверены, что хотите удалить изображение?".to_string(),
            delete_failed: "Не удалось удалить изображение!".to_string(),
            confirm_clear: "Вы уверены, что хотите сбросить разметку?".to_string(),
            clear_failed: "Не удалось сбросить разметку!".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoints: Endpoints::default(),
            request_timeout_ms: default_request_timeout_ms(),
            labeled_per_page: default_labeled_per_page(),
            messages: Messages::default(),
            keybindings: KeyBindings::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if let Some((key, shortcut, other)) = config.keybindings.first_conflict() {
            return Err(ConfigError::KeyConflict {
                key,
                shortcut: shortcut.name(),
                other,
            });
        }

        Ok(config)
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "imlabel-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for ClientConfig {
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

    /// The same key is bound to two shortcuts
    #[error("Key '{key}' of \"{shortcut}\" is also bound to \"{other}\"")]
    KeyConflict {
        key: char,
        shortcut: &'static str,
        other: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybindings::Shortcut;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_millis(1000));
        assert_eq!(config.labeled_per_page, 10);
        assert_eq!(config.endpoints.save, "/save");
        assert_eq!(config.endpoints.clear_labeling, "/clear_labeling");
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = ClientConfig::new();
        config.request_timeout_ms = 2500;
        config.log_level = LogLevel::Debug;

        let json = config.to_json().unwrap();
        let loaded = ClientConfig::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ClientConfig::from_json(
            r#"{"version": 1, "endpoints": {"save": "/api/save"}, "log_level": "warn"}"#,
        )
        .unwrap();

        assert_eq!(config.endpoints.save, "/api/save");
        assert_eq!(config.endpoints.delete, "/delete");
        assert_eq!(config.request_timeout_ms, 1000);
        assert_eq!(config.messages, Messages::default());
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = ClientConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_rejects_conflicting_keys() {
        let mut config = ClientConfig::new();
        config.keybindings.set_keys(Shortcut::DeleteImage, vec!['S']);
        let json = config.to_json().unwrap();

        assert!(matches!(
            ClientConfig::from_json(&json),
            Err(ConfigError::KeyConflict { key: 'S', .. })
        ));
    }
}
