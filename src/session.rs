//! Session persistence: a bearer token plus identity fields behind a small
//! key-value interface.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Fixed storage key for the bearer token.
pub const TOKEN_KEY: &str = "device_token";
/// Fixed storage key for the device display name.
pub const DEVICE_NAME_KEY: &str = "device_name";
/// Fixed storage key for the enroll ID.
pub const ENROLL_ID_KEY: &str = "enroll_id";

// ---------------------------------------------------------------------------
// KeyValueStore — persistent string map
// ---------------------------------------------------------------------------

/// Minimal persistent key-value surface. The session store is the only
/// writer; reads are cheap and may happen on every authenticated call.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Single-file JSON store, written through on every mutation. A missing file
/// reads as an empty store; a malformed one is a storage error rather than a
/// silent reset.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| Error::Storage {
                detail: format!("{}: {}", path.display(), e),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(Error::Storage {
                    detail: format!("{}: {}", path.display(), e),
                })
            }
        };
        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Storage {
                    detail: format!("{}: {}", parent.display(), e),
                })?;
            }
        }
        let text = serde_json::to_string_pretty(&self.entries).map_err(|e| Error::Storage {
            detail: e.to_string(),
        })?;
        fs::write(&self.path, text).map_err(|e| Error::Storage {
            detail: format!("{}: {}", self.path.display(), e),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// The session: token plus identity fields, present or absent as a unit
/// keyed by the token. No side effects beyond storage, no network calls.
pub struct SessionStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// True iff a token is present in storage.
    pub fn is_authenticated(&self) -> bool {
        self.store.get(TOKEN_KEY).is_some()
    }

    /// Write the token and identity fields. The token is opaque; no shape
    /// validation is performed.
    pub fn login(&mut self, token: &str, device_name: &str, enroll_id: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(DEVICE_NAME_KEY, device_name)?;
        self.store.set(ENROLL_ID_KEY, enroll_id)?;
        Ok(())
    }

    /// Remove the token and all identity fields. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(DEVICE_NAME_KEY)?;
        self.store.remove(ENROLL_ID_KEY)?;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    pub fn device_name(&self) -> Option<String> {
        self.store.get(DEVICE_NAME_KEY)
    }

    pub fn enroll_id(&self) -> Option<String> {
        self.store.get(ENROLL_ID_KEY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
