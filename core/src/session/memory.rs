//! In-memory session store.
//!
//! Holds artifacts for the lifetime of the process only. Used by
//! ephemeral profiles ("don't remember me") and as the store fake in
//! tests, seeded with arbitrary fixtures.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::StoreError;

use super::store::{SessionKey, SessionStore, StoreConfig};

/// Session store backed by a process-local map.
///
/// # Example
/// ```
/// use session_gate_core::session::{MemorySessionStore, SessionKey, SessionStore};
///
/// let store = MemorySessionStore::new();
/// store.write(SessionKey::AccessToken, "opaque-token").unwrap();
/// assert_eq!(store.read(SessionKey::AccessToken).as_deref(), Some("opaque-token"));
///
/// store.clear_all();
/// assert_eq!(store.read(SessionKey::AccessToken), None);
/// ```
pub struct MemorySessionStore {
    config: StoreConfig,
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::new())
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // Entries are plain strings, so a panicked writer cannot leave them
    // half-updated; recover the guard instead of propagating poison.
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
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks a hypothetical write against the configured capacity.
///
/// Usage counts key and value bytes across all entries, the way
/// browser storage accounts its quota.
pub(crate) fn exceeds_quota(
    config: &StoreConfig,
    entries: &HashMap<String, String>,
    storage_key: &str,
    raw: &str,
) -> bool {
    let Some(max_bytes) = config.get_max_bytes() else {
        return false;
    };
    let current: usize = entries.iter().map(|(k, v)| k.len() + v.len()).sum();
    let replaced = entries
        .get(storage_key)
        .map(|v| storage_key.len() + v.len())
        .unwrap_or(0);
    current - replaced + storage_key.len() + raw.len() > max_bytes
}

impl SessionStore for MemorySessionStore {
    fn write(&self, key: SessionKey, raw: &str) -> Result<(), StoreError> {
        let storage_key = self.config.storage_key(key);
        let mut entries = self.entries_write();
        if exceeds_quota(&self.config, &entries, &storage_key, raw) {
            return Err(StoreError::QuotaExceeded);
        }
        entries.insert(storage_key, raw.to_string());
        Ok(())
    }

    fn read(&self, key: SessionKey) -> Option<String> {
        self.entries_read()
            .get(&self.config.storage_key(key))
            .cloned()
    }

    fn remove(&self, key: SessionKey) {
        self.entries_write().remove(&self.config.storage_key(key));
    }

    fn clear_all(&self) {
        self.entries_write().clear();
    }
}
