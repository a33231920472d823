//! Persistent key-value store for user preferences.
//!
//! The table keeps exactly one preference in it: the set of keys the user has
//! hidden, stored as a JSON array of strings under the configured key.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Error types for preference store access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// I/O error while reading or writing the store.
    Io(String),
    /// Key cannot be used as a storage name.
    InvalidKey(String),
    /// Value could not be encoded for storage.
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "I/O error: {}", msg),
            StoreError::InvalidKey(key) => write!(f, "invalid store key '{}'", key),
            StoreError::Serialize(msg) => write!(f, "cannot encode value: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value store.
pub trait PreferenceStore {
    /// Returns the stored value, or `None` if the key was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes the value synchronously.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keys usable as file names: ASCII alphanumerics, `_`, `-` and `.`,
/// not starting with a dot.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Per-user state directory (`$XDG_STATE_HOME/livetab` on Linux),
    /// falling back to the local data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|d| d.join("livetab"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl PreferenceStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_err = |e: std::io::Error| StoreError::Io(format!("{}: {}", path.display(), e));
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Write-then-rename so a reader never sees a partial file
        let tmp = path.with_extension("json.tmp");
        if let Err(e) = write_and_rename(&tmp, &path, value.as_bytes()) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!(path = %tmp.display(), error = %cleanup, "temp file not removed");
            }
            return Err(io_err(e));
        }
        debug!(path = %path.display(), "preferences saved");
        Ok(())
    }
}

fn write_and_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(tmp, path)
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads the hidden-key set. Missing, unreadable or malformed data yields
/// an empty set.
pub fn load_hidden(store: &dyn PreferenceStore, key: &str) -> BTreeSet<String> {
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeSet::new(),
        Err(e) => {
            warn!(key, error = %e, "cannot read hidden keys, starting empty");
            return BTreeSet::new();
        }
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(keys) => keys.into_iter().collect(),
        Err(e) => {
            warn!(key, error = %e, "malformed hidden keys, starting empty");
            BTreeSet::new()
        }
    }
}

/// Persists the hidden-key set as a JSON array of strings.
pub fn save_hidden(
    store: &mut dyn PreferenceStore,
    key: &str,
    hidden: &BTreeSet<String>,
) -> Result<(), StoreError> {
    let keys: Vec<&String> = hidden.iter().collect();
    let json = serde_json::to_string(&keys).map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.save(key, &json)
}
