//! Front-end preferences
//!
//! Gameplay constants live in [`crate::consts`] and are not configurable.
//! Settings only cover how the front end feeds keys to the game. Native
//! builds read a JSON file; web builds read LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};
use crate::error::{Error, Result};

/// Upper bound for both repeat timings
const MAX_REPEAT_MS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Time a paddle key must be held before it starts repeating
    pub key_repeat_delay_ms: u32,
    /// Time between repeats of a held paddle key
    pub key_repeat_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_repeat_delay_ms: KEY_REPEAT_DELAY_MS,
            key_repeat_interval_ms: KEY_REPEAT_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file (native only)
    pub const PATH_ENV: &'static str = "PONG_SETTINGS";
    /// Settings file looked up in the working directory (native only)
    pub const DEFAULT_FILE: &'static str = "pong-settings.json";
    /// LocalStorage key (web only)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pong_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_repeat_interval_ms == 0 {
            return Err(Error::InvalidSettings {
                field: "key_repeat_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.key_repeat_interval_ms > MAX_REPEAT_MS {
            return Err(Error::InvalidSettings {
                field: "key_repeat_interval_ms",
                reason: format!("must be at most {MAX_REPEAT_MS}"),
            });
        }
        if self.key_repeat_delay_ms > MAX_REPEAT_MS {
            return Err(Error::InvalidSettings {
                field: "key_repeat_delay_ms",
                reason: format!("must be at most {MAX_REPEAT_MS}"),
            });
        }
        Ok(())
    }

    /// Load settings from the settings file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::DEFAULT_FILE));

        match Self::load_from(&path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Read a settings file; `Ok(None)` if it does not exist
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_repeat() {
        let settings = Settings::default();
        assert_eq!(settings.key_repeat_delay_ms, 20);
        assert_eq!(settings.key_repeat_interval_ms, 20);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "key_repeat_delay_ms": 250 }"#).unwrap();
        assert_eq!(settings.key_repeat_delay_ms, 250);
        assert_eq!(settings.key_repeat_interval_ms, 20);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = Settings::from_json(r#"{ "key_repeat_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSettings {
                field: "key_repeat_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_huge_delay_rejected() {
        assert!(Settings::from_json(r#"{ "key_repeat_delay_ms": 5000 }"#).is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ nope").unwrap_err();
        assert!(matches!(err, Error::SettingsParse(_)));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("pong-settings-does-not-exist.json");
        assert_eq!(Settings::load_from(&path).unwrap(), None);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pong-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "key_repeat_interval_ms": 35 }"#).unwrap();
        let loaded = Settings::load_from(&path).unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.key_repeat_interval_ms, 35);
    }
}
