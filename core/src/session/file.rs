//! File-backed session store.
//!
//! Persists artifacts as a single JSON document so a restarted client
//! resumes the session that was last established. The document lives
//! in the client's profile directory and is written through on every
//! mutation.
//!
//! An unreadable or undecodable document opens the store empty rather
//! than failing: a session that cannot be decoded is a session that
//! does not exist, matching the gate's fail-closed policy.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;

use super::memory::exceeds_quota;
use super::store::{SessionKey, SessionStore, StoreConfig};

/// Session store backed by a JSON document on disk.
///
/// # Example
/// ```no_run
/// use session_gate_core::session::{FileSessionStore, SessionKey, SessionStore};
///
/// let store = FileSessionStore::open("/home/user/.config/dashboard/session.json");
/// store.write(SessionKey::AccessToken, "opaque-token").unwrap();
///
/// // A later process sees the same session.
/// let reopened = FileSessionStore::open("/home/user/.config/dashboard/session.json");
/// assert_eq!(reopened.read(SessionKey::AccessToken).as_deref(), Some("opaque-token"));
/// ```
pub struct FileSessionStore {
    config: StoreConfig,
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Open the store at `path` with the default configuration.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with_config(path, StoreConfig::new())
    }

    /// Open the store at `path`, loading any previously persisted
    /// session.
    pub fn open_with_config(path: impl Into<PathBuf>, config: StoreConfig) -> Self {
        let path = path.into();
        let entries = load_document(&path);
        Self {
            config,
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries_read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn entries_write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let document =
            serde_json::to_string(entries).map_err(|source| StoreError::Serialize { source })?;
        fs::write(&self.path, document).map_err(|source| StoreError::Io { source })
    }
}

/// Loads the persisted document, degrading to an empty session on any
/// missing, unreadable, or undecodable input.
fn load_document(path: &Path) -> HashMap<String, String> {
    fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

impl SessionStore for FileSessionStore {
    fn write(&self, key: SessionKey, raw: &str) -> Result<(), StoreError> {
        let storage_key = self.config.storage_key(key);
        let mut entries = self.entries_write();
        if exceeds_quota(&self.config, &entries, &storage_key, raw) {
            return Err(StoreError::QuotaExceeded);
        }
        let previous = entries.insert(storage_key.clone(), raw.to_string());
        match self.persist(&entries) {
            Ok(()) => Ok(()),
            Err(err) => {
                // Keep memory and disk in agreement: a failed write
                // stores nothing.
                match previous {
                    Some(value) => entries.insert(storage_key, value),
                    None => entries.remove(&storage_key),
                };
                Err(err)
            }
        }
    }

    fn read(&self, key: SessionKey) -> Option<String> {
        self.entries_read()
            .get(&self.config.storage_key(key))
            .cloned()
    }

    fn remove(&self, key: SessionKey) {
        let mut entries = self.entries_write();
        if entries.remove(&self.config.storage_key(key)).is_some() {
            // Logout must not fail; the in-memory view is already
            // cleared and the next successful write re-syncs the disk.
            let _ = self.persist(&entries);
        }
    }

    fn clear_all(&self) {
        let mut entries = self.entries_write();
        entries.clear();
        // Deleting the document beats persisting an empty map: there is
        // nothing left on disk for a later process to resurrect.
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                let _ = self.persist(&entries);
            }
        }
    }
}
