#![warn(clippy::all, clippy::pedantic)]

//! Key-value persistence behind the session records and the settings.
//!
//! Everything above this module works with typed values; the backends only
//! ever see string keys and string values.

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Read/write contract every storage backend provides.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// The persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    HighScore,
    BestAccuracy,
    SfxVolume,
    MusicVolume,
    CrosshairStyle,
}

impl StoreKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::HighScore => "highScore",
            StoreKey::BestAccuracy => "bestAccuracy",
            StoreKey::SfxVolume => "sfxVolume",
            StoreKey::MusicVolume => "musicVolume",
            StoreKey::CrosshairStyle => "crosshairStyle",
        }
    }
}

/// Reads and parses one key. Backend and parse failures are logged and
/// reported as absent so callers can fall back to their defaults.
pub fn load<T>(store: &dyn KeyValueStore, key: StoreKey) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match store.read(key.as_str()) {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring stored {}={raw:?}: {e}", key.as_str());
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read {}: {e}", key.as_str());
            None
        }
    }
}

/// Writes one key. Returns false (after logging) if the backend failed.
pub fn save<T: Display>(store: &dyn KeyValueStore, key: StoreKey, value: T) -> bool {
    match store.write(key.as_str(), &value.to_string()) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to persist {}: {e}", key.as_str());
            false
        }
    }
}

/// Volatile backend; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persistent backend: one flat TOML table of string values.
///
/// The whole table is rewritten on every write, through a sibling temp file
/// that is renamed over the old file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            BTreeMap::new()
        };
        debug!("Opened store {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string(entries)?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        let previous = entries.insert(key.to_string(), value.to_string());

        if let Err(e) = self.flush(&entries) {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

// Custom error type for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Poisoned,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Parse(e) => write!(f, "malformed store file: {e}"),
            StorageError::Serialize(e) => write!(f, "could not encode store: {e}"),
            StorageError::Poisoned => f.write_str("store lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Parse(e) => Some(e),
            StorageError::Serialize(e) => Some(e),
            StorageError::Poisoned => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<toml::de::Error> for StorageError {
    fn from(err: toml::de::Error) -> Self {
        StorageError::Parse(err)
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(err: toml::ser::Error) -> Self {
        StorageError::Serialize(err)
    }
}
