//! Feature gating against the stored authority list.
//!
//! The gate is the single decision point for "may the current session
//! see this feature". It is called inline, once per guarded feature
//! per render pass, so it must stay synchronous, read-only, and total:
//! whatever the store holds, the answer is a plain `bool`.
//!
//! Every evaluation reads the store again. Nothing is cached on this
//! side of the store boundary, so a logout is reflected by the very
//! next call without the UI being told.

use super::audit::{AuditLogger, SessionEvent};
use super::authorities::AuthorityList;
use super::store::{SessionKey, SessionStore};

/// Decides feature visibility for the current session.
///
/// The store is injected rather than reached as an ambient singleton,
/// so the gate can be exercised against a fake store holding arbitrary
/// fixtures.
///
/// # Example
/// ```
/// use session_gate_core::session::{AuthorizationGate, MemorySessionStore, SessionKey, SessionStore};
///
/// let store = MemorySessionStore::new();
/// store
///     .write(SessionKey::Authorities, r#"[{"authority":"ROLE_BASIC"}]"#)
///     .unwrap();
///
/// let gate = AuthorizationGate::new(&store);
/// assert!(gate.has_any_role(&["ROLE_BASIC", "ROLE_ADMIN"]));
/// assert!(!gate.has_any_role(&["ROLE_ADMIN"]));
/// ```
pub struct AuthorizationGate<S: SessionStore> {
    store: S,
    audit: Option<AuditLogger>,
}

impl<S: SessionStore> AuthorizationGate<S> {
    /// Create a gate over `store`.
    pub fn new(store: S) -> Self {
        Self { store, audit: None }
    }

    /// Attach an audit logger.
    ///
    /// Gate outcomes and malformed-data detections are then emitted as
    /// session events. The boolean results are identical with or
    /// without a logger attached.
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the current session may see a feature guarded by
    /// `required_roles`.
    ///
    /// - `None` or an empty slice mean the feature is unrestricted:
    ///   always `true`.
    /// - Otherwise the session qualifies when it holds at least one of
    ///   the required labels, compared by exact string equality. The
    ///   order of either side is irrelevant.
    /// - A session holding nothing (never authenticated, logged out,
    ///   or with an undecodable stored list) is denied. Corrupted
    ///   storage can only ever deny; it never raises.
    pub fn is_authorized<R: AsRef<str>>(&self, required_roles: Option<&[R]>) -> bool {
        let required = match required_roles {
            None => return true,
            Some(required) if required.is_empty() => return true,
            Some(required) => required,
        };

        let authorized = self.held_authorities().holds_any(required);

        if let Some(audit) = &self.audit {
            let event = if authorized {
                SessionEvent::access_granted(required)
            } else {
                SessionEvent::access_denied(required)
            };
            audit.log(event);
        }

        authorized
    }

    /// Whether the session holds any of `roles`.
    ///
    /// Convenience for statically known role sets; an empty slice means
    /// unrestricted, as in [`is_authorized`](Self::is_authorized).
    pub fn has_any_role<R: AsRef<str>>(&self, roles: &[R]) -> bool {
        self.is_authorized(Some(roles))
    }

    /// The authorities held by the current session.
    ///
    /// Reads the store on every call. Absent and undecodable data both
    /// yield the empty list; the undecodable case is additionally
    /// reported on the audit channel when a logger is attached.
    pub fn held_authorities(&self) -> AuthorityList {
        let Some(raw) = self.store.read(SessionKey::Authorities) else {
            return AuthorityList::default();
        };

        match AuthorityList::parse(&raw) {
            Some(held) => held,
            None => {
                if let Some(audit) = &self.audit {
                    audit.log(SessionEvent::malformed_authority_data(
                        SessionKey::Authorities.as_str(),
                    ));
                }
                AuthorityList::default()
            }
        }
    }
}
