//! User preferences and local storage
//!
//! Preferences are an explicit value: loaded once at startup, passed to
//! whatever needs them, and saved on every change. They are kept in a small
//! JSON key/value file under the user's data directory
//! (~/.local/share/geotube/storage.json), stored under a fixed key.

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::storage::{PREFERENCES_KEY, STORE_FILE_NAME};
use crate::error::{Error, Result};
use crate::i18n::find_language;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Interface language choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Language name as shown to the user, e.g. "Español"
    #[serde(rename = "language")]
    pub display_language: String,
    /// ISO 639-1 code, e.g. "es"
    #[serde(rename = "languageCode")]
    pub language_code: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            display_language: "Español".to_string(),
            language_code: "es".to_string(),
        }
    }
}

impl UserPreferences {
    /// Preferences for a supported language code
    pub fn for_language(code: &str) -> Result<Self> {
        let language = find_language(code)
            .ok_or_else(|| Error::InvalidInput(format!("Unsupported language: {}", code)))?;

        Ok(Self {
            display_language: language.name.to_string(),
            language_code: language.code.to_string(),
        })
    }
}

/// File-backed key/value store
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store at the default data path
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;
        Ok(Self::at(dir.join(STORE_FILE_NAME)))
    }

    /// Store at a specific path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Read and decode the value under `key`
    ///
    /// Ok(None) when the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_all()?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Write `value` under `key`, keeping other keys
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!("Discarding unreadable store {}: {}", self.path.display(), e);
            Map::new()
        });
        entries.insert(key.to_string(), serde_json::to_value(value)?);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Loads and saves [`UserPreferences`]
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    store: LocalStore,
}

impl PreferenceStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// File backing the store
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Saved preferences, or the defaults when none are saved or readable
    pub fn load(&self) -> UserPreferences {
        match self.store.get::<UserPreferences>(PREFERENCES_KEY) {
            Ok(Some(prefs)) => prefs,
            Ok(None) => UserPreferences::default(),
            Err(e) => {
                warn!("Could not read preferences, using defaults: {}", e);
                UserPreferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &UserPreferences) -> Result<()> {
        self.store.set(PREFERENCES_KEY, prefs)
    }

    /// Switch the interface language and persist the result
    pub fn change_language(&self, current: &UserPreferences, code: &str) -> Result<UserPreferences> {
        let updated = UserPreferences::for_language(code)?;
        if &updated != current {
            self.save(&updated)?;
        }
        Ok(updated)
    }
}
