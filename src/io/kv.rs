use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Storage key for the link document
pub const LINKS_KEY: &str = "nebula_links";
/// Storage key for the category document
pub const CATEGORIES_KEY: &str = "nebula_categories";

/// Error type for key-value storage
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not serialize {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

/// A synchronous string key-value store holding whole serialized documents
pub trait KvStore {
    /// Return the stored document, or `None` if the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    /// Replace the document stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }
}

/// Load and parse a document, falling back to `default` on any failure.
pub fn load<T, S>(store: &S, key: &str, default: impl FnOnce() -> T) -> T
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("stored {key} is unreadable, using defaults: {e}");
                default()
            }
        },
        Ok(None) => {
            log::debug!("no stored {key}, using defaults");
            default()
        }
        Err(e) => {
            log::warn!("failed to load {key}, using defaults: {e}");
            default()
        }
    }
}

/// Serialize and write a document. Failures are logged, never returned.
pub fn save<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let text = match serde_json::to_string_pretty(value) {
        Ok(text) => text,
        Err(source) => {
            let e = KvError::Serialize {
                key: key.to_string(),
                source,
            };
            log::error!("{e}");
            return;
        }
    };
    if let Err(e) = store.set(key, &text) {
        log::error!("failed to save {key}: {e}");
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open (creating if needed) the data directory
    pub fn open(dir: &Path) -> Result<Self, KvError> {
        fs::create_dir_all(dir).map_err(|source| KvError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(FileKvStore {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(KvError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes()).map_err(|source| KvError::Io { path, source })
    }
}

/// Write through a temp file in the same directory, then rename over the target
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store; counts writes so callers can assert on persistence
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key without counting it as a write
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Keys written so far, in write order
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.borrow_mut().push(key.to_string());
        Ok(())
    }
}
