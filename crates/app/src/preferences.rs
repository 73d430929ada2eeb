//! File-backed preference store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use nab_market::preferences::{PreferencesError, PreferencesStore};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// File name of the store inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Preference store persisted as a single JSON object.
///
/// Every write rewrites the whole file. A missing file is an empty store, and an unreadable
/// one is replaced on the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring corrupt preferences file");

                Map::new()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Map::new(),
            Err(err) => return Err(err.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "opened preferences");

        Ok(Self { path, entries })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;

        Ok(())
    }
}

impl PreferencesStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
        Ok(self.entries.get(key).map(Value::to_string))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), PreferencesError> {
        let value = serde_json::from_str(&value).unwrap_or(Value::String(value));

        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), PreferencesError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }

        Ok(())
    }
}
