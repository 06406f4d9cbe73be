//! Key/value persistence for progression, settings and ledger records.
//!
//! Records are JSON strings under fixed keys. Decoding problems never reach
//! the learner: a corrupt record is logged and treated as missing, and the
//! caller falls back to defaults.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::learning_engine::models::{Profile, ProgressionSettings, ProgressionSnapshot};

pub const PROGRESSION_KEY: &str = "thai-word-progression";
pub const SETTINGS_KEY: &str = "thai-word-settings";
pub const LEDGER_KEY_PREFIX: &str = "thai-learning-progress";

/// Record key for one profile's ledger.
pub fn ledger_key(profile: Profile) -> String {
    format!("{}-{}", LEDGER_KEY_PREFIX, profile.storage_suffix())
}

/// Blocking string store.
pub trait ProgressStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store, used by tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir { path: dir.clone(), source })?;
        debug!(dir = %dir.display(), "file store opened");
        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl ProgressStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StoreError::Write { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove { path, source }),
        }
    }
}

/// Load and decode a record. Missing or corrupt records come back as `None`.
pub fn load_json<T: DeserializeOwned, S: ProgressStore + ?Sized>(
    store: &S, key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "ignoring corrupt record");
            Ok(None)
        }
    }
}

pub fn save_json<T: Serialize, S: ProgressStore + ?Sized>(
    store: &mut S, key: &str, value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|source| StoreError::Encode { key: key.to_string(), source })?;
    store.save(key, &raw)
}

pub fn load_settings<S: ProgressStore + ?Sized>(store: &S) -> Result<ProgressionSettings, StoreError> {
    Ok(load_json(store, SETTINGS_KEY)?.unwrap_or_default())
}

pub fn save_settings<S: ProgressStore + ?Sized>(
    store: &mut S, settings: &ProgressionSettings,
) -> Result<(), StoreError> {
    save_json(store, SETTINGS_KEY, settings)
}

pub fn load_progression<S: ProgressStore + ?Sized>(store: &S) -> Result<Option<ProgressionSnapshot>, StoreError> {
    load_json(store, PROGRESSION_KEY)
}

/// Persist a snapshot. Empty word lists are not written, so a filter that
/// matches nothing does not clobber the last useful snapshot.
pub fn save_progression<S: ProgressStore + ?Sized>(
    store: &mut S, snapshot: &ProgressionSnapshot,
) -> Result<(), StoreError> {
    if snapshot.available_words_length == 0 {
        return Ok(());
    }
    save_json(store, PROGRESSION_KEY, snapshot)
}

pub fn clear_progression<S: ProgressStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(PROGRESSION_KEY)
}
