//! Preferences
//!
//! UI preferences persisted as JSON values under fixed keys in a key-value store. Reading
//! never fails: a missing value gives the default, a corrupt value gives the default and is
//! removed from the store.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

use crate::{i18n::Language, theme::Theme, wishlist::Wishlist};

/// Key holding the dark mode flag
pub const THEME_KEY: &str = "nab-theme";

/// Key holding the language code
pub const LANGUAGE_KEY: &str = "nab-language";

/// Key holding the signed-in user
pub const SESSION_KEY: &str = "nab-session";

/// Key holding saved product ids
pub const WISHLIST_KEY: &str = "nab-wishlist";

/// Preference store errors
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Backing file could not be read or written
    #[error("Failed to access preference store: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded or the store is not a JSON object
    #[error("Failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store holding JSON-encoded values.
pub trait PreferencesStore: fmt::Debug {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PreferencesError>;

    /// Write the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError>;

    /// Remove `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), PreferencesError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError> {
        self.entries.insert(key.to_string(), value);

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferencesError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// Signed-in user, kept only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name
    pub name: String,

    /// Teams handle
    pub teams_id: String,
}

/// Every persisted preference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Colour theme
    pub theme: Theme,

    /// Interface language
    pub language: Language,

    /// Signed-in user
    pub session: Option<Session>,

    /// Saved products
    pub wishlist: Wishlist,
}

impl Preferences {
    /// Read every preference, falling back to defaults.
    ///
    /// Corrupt values are removed from the store. A store that cannot be read yields defaults.
    pub fn load(store: &mut dyn PreferencesStore) -> Self {
        let dark: bool = read_or_default(store, THEME_KEY);
        let code: Option<String> = read_or_default(store, LANGUAGE_KEY);

        let language = code.map_or_else(Language::default, |code| {
            code.parse().unwrap_or_else(|_err| {
                warn!(key = LANGUAGE_KEY, %code, "unsupported language, using default");
                discard(store, LANGUAGE_KEY);

                Language::default()
            })
        });

        Self {
            theme: Theme::from_dark(dark),
            language,
            session: read_or_default(store, SESSION_KEY),
            wishlist: read_or_default(store, WISHLIST_KEY),
        }
    }

    /// Write every preference.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be encoded or the store cannot be written.
    pub fn save(&self, store: &mut dyn PreferencesStore) -> Result<(), PreferencesError> {
        write(store, THEME_KEY, &self.theme.is_dark())?;
        write(store, LANGUAGE_KEY, &self.language.code())?;
        write(store, WISHLIST_KEY, &self.wishlist)?;

        match &self.session {
            Some(session) => write(store, SESSION_KEY, session),
            None => store.remove(SESSION_KEY),
        }
    }

    /// Remove every preference from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(store: &mut dyn PreferencesStore) -> Result<(), PreferencesError> {
        for key in [THEME_KEY, LANGUAGE_KEY, SESSION_KEY, WISHLIST_KEY] {
            store.remove(key)?;
        }

        Ok(())
    }
}

/// Encode `value` as JSON and write it under `key`.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or the store cannot be written.
pub fn write<T: Serialize + ?Sized>(
    store: &mut dyn PreferencesStore,
    key: &str,
    value: &T,
) -> Result<(), PreferencesError> {
    store.set(key, serde_json::to_string(value)?)
}

/// Read and decode the value under `key`, falling back to the default.
pub fn read_or_default<T: DeserializeOwned + Default>(
    store: &mut dyn PreferencesStore,
    key: &str,
) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, error = %err, "failed to read preference, using default");

            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(key, error = %err, "corrupt preference, using default");
        discard(store, key);

        T::default()
    })
}

fn discard(store: &mut dyn PreferencesStore, key: &str) {
    if let Err(err) = store.remove(key) {
        warn!(key, error = %err, "failed to remove corrupt preference");
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    #[test]
    fn empty_store_gives_defaults() {
        let mut store = MemoryStore::new();
        let preferences = Preferences::load(&mut store);

        assert_eq!(preferences, Preferences::default());
        assert_eq!(preferences.theme, Theme::Light);
        assert_eq!(preferences.language, Language::En);
    }

    #[test]
    fn save_then_load() -> TestResult {
        let mut store = MemoryStore::new();
        let mut preferences = Preferences {
            theme: Theme::Dark,
            language: Language::Hi,
            session: Some(Session {
                name: "Sarah Johnson".to_string(),
                teams_id: "sarah.johnson@nab.com.au".to_string(),
            }),
            wishlist: Wishlist::new(),
        };
        preferences.wishlist.add(ProductId(3))?;

        preferences.save(&mut store)?;

        assert_eq!(store.get(THEME_KEY)?.as_deref(), Some("true"));
        assert_eq!(store.get(LANGUAGE_KEY)?.as_deref(), Some("\"hi\""));
        assert_eq!(store.get(WISHLIST_KEY)?.as_deref(), Some("[3]"));
        assert_eq!(Preferences::load(&mut store), preferences);

        Ok(())
    }

    #[test]
    fn corrupt_values_fall_back_and_are_removed() -> TestResult {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "{not json".to_string())?;
        store.set(LANGUAGE_KEY, "\"klingon\"".to_string())?;
        store.set(WISHLIST_KEY, "[8]".to_string())?;

        let preferences = Preferences::load(&mut store);

        assert_eq!(preferences.theme, Theme::Light);
        assert_eq!(preferences.language, Language::En);
        assert!(preferences.wishlist.contains(ProductId(8)));
        assert_eq!(store.get(THEME_KEY)?, None);
        assert_eq!(store.get(LANGUAGE_KEY)?, None);
        assert!(store.get(WISHLIST_KEY)?.is_some());

        Ok(())
    }

    #[test]
    fn clear_removes_every_key() -> TestResult {
        let mut store = MemoryStore::new();
        Preferences::default().save(&mut store)?;

        Preferences::clear(&mut store)?;

        assert_eq!(store.get(THEME_KEY)?, None);
        assert_eq!(store.get(WISHLIST_KEY)?, None);

        Ok(())
    }
}
