//! Session store contract and persisted key layout.
//!
//! The store is a string-keyed, string-valued map scoped to one client
//! profile. It is written once per successful authentication, read on
//! every gate evaluation, and cleared on logout. All operations are
//! synchronous; the surrounding login/logout flow serializes writers.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

// =============================================================================
// Session Keys
// =============================================================================

/// Keys under which session artifacts are persisted.
///
/// Each key is independent; the store makes no cross-key atomicity
/// guarantee. A reader may observe a written token without a matching
/// authority list if a login write sequence is interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Serialized identity of the authenticated user.
    CurrentUser,
    /// Opaque access token.
    AccessToken,
    /// Opaque refresh token.
    RefreshToken,
    /// Serialized sequence of granted authority records.
    Authorities,
}

impl SessionKey {
    /// Storage name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::CurrentUser => "currentUser",
            SessionKey::AccessToken => "accessToken",
            SessionKey::RefreshToken => "refreshToken",
            SessionKey::Authorities => "authorities",
        }
    }

    /// All keys, in the order the login flow writes them.
    pub fn all() -> [SessionKey; 4] {
        [
            SessionKey::CurrentUser,
            SessionKey::AccessToken,
            SessionKey::RefreshToken,
            SessionKey::Authorities,
        ]
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Store configuration.
///
/// # Example
/// ```
/// use session_gate_core::session::StoreConfig;
///
/// let config = StoreConfig::new()
///     .namespace("dashboard")
///     .max_bytes(64 * 1024);
///
/// assert_eq!(config.get_namespace(), Some("dashboard"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Prefix isolating this profile's entries
    namespace: Option<String>,
    /// Capacity in bytes across keys and values (None = unlimited)
    max_bytes: Option<usize>,
}

impl StoreConfig {
    /// Create a configuration with no namespace and no capacity limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace prefix for stored keys.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Set the capacity in bytes, counted over keys and values.
    ///
    /// A write that would push the store past this limit fails with
    /// [`StoreError::QuotaExceeded`].
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Get the namespace.
    pub fn get_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Get the capacity limit.
    pub fn get_max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// Full storage name for `key` under this configuration.
    pub(crate) fn storage_key(&self, key: SessionKey) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}.{}", namespace, key.as_str()),
            None => key.as_str().to_string(),
        }
    }
}

// =============================================================================
// Store Contract
// =============================================================================

/// Durable key-value persistence for session artifacts.
///
/// Implementations are synchronous and are invoked inline during
/// rendering and navigation passes. Reads always go back to the store;
/// no caller-side caching is expected, so a logout is visible to the
/// very next read.
pub trait SessionStore {
    /// Stores `raw` under `key`, overwriting any prior value.
    fn write(&self, key: SessionKey, raw: &str) -> Result<(), StoreError>;

    /// Returns the raw value stored under `key`, or `None` if never
    /// written or cleared.
    fn read(&self, key: SessionKey) -> Option<String>;

    /// Removes the value stored under `key`.
    fn remove(&self, key: SessionKey);

    /// Removes every session artifact. Called by the logout flow.
    fn clear_all(&self);

    /// Serializes `value` as JSON and stores it under `key`.
    fn write_json<T: Serialize>(&self, key: SessionKey, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let raw =
            serde_json::to_string(value).map_err(|source| StoreError::Serialize { source })?;
        self.write(key, &raw)
    }

    /// Reads and decodes the value stored under `key`.
    ///
    /// Total over the stored bytes: an absent value and an undecodable
    /// value both yield `None`.
    fn read_json<T: DeserializeOwned>(&self, key: SessionKey) -> Option<T>
    where
        Self: Sized,
    {
        self.read(key)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }
}

impl<S: SessionStore> SessionStore for &S {
    fn write(&self, key: SessionKey, raw: &str) -> Result<(), StoreError> {
        (**self).write(key, raw)
    }

    fn read(&self, key: SessionKey) -> Option<String> {
        (**self).read(key)
    }

    fn remove(&self, key: SessionKey) {
        (**self).remove(key)
    }

    fn clear_all(&self) {
        (**self).clear_all()
    }
}
