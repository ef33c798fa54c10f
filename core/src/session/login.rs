//! Session lifecycle: establishing and terminating the stored session.
//!
//! The login flow validates credentials against the backend and then
//! hands the response here to persist. The gate never writes; this
//! module is the only writer of session artifacts.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::audit::{audit_log, SessionEvent};
use super::authorities::GrantedAuthority;
use super::store::{SessionKey, SessionStore};
use super::user::CurrentUser;

/// The artifacts a successful authentication yields, mirroring the
/// backend's login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginArtifacts {
    /// Authenticated identity.
    pub user: CurrentUser,
    /// Opaque access token.
    pub access_token: String,
    /// Opaque refresh token.
    pub refresh_token: String,
    /// Authorities granted to this principal, exactly as issued.
    pub authorities: Vec<GrantedAuthority>,
}

/// Write side of the session: login persists, logout clears.
///
/// # Example
/// ```ignore
/// // In the login flow, after the backend accepted the credentials:
/// match AuthSession::login(&store, &artifacts) {
///     Ok(()) => navigate_to_dashboard(),
///     Err(StoreError::QuotaExceeded) => show_clear_browser_data_notice(),
///     Err(err) => show_error(err),
/// }
/// ```
pub struct AuthSession;

impl AuthSession {
    /// Persist every artifact of a successful authentication,
    /// overwriting whatever session was stored before.
    ///
    /// Writes are not atomic across keys. Authorities are written
    /// last, so an interrupted login leaves a session that at worst
    /// holds stale or no authorities for the new identity, and the
    /// gate then denies rather than over-grants.
    ///
    /// A [`StoreError::QuotaExceeded`] failure must be surfaced to the
    /// user by the login flow; nothing here recovers from it.
    pub fn login<S: SessionStore>(
        store: &S,
        artifacts: &LoginArtifacts,
    ) -> Result<(), StoreError> {
        audited(
            SessionKey::CurrentUser,
            store.write_json(SessionKey::CurrentUser, &artifacts.user),
        )?;
        audited(
            SessionKey::AccessToken,
            store.write(SessionKey::AccessToken, &artifacts.access_token),
        )?;
        audited(
            SessionKey::RefreshToken,
            store.write(SessionKey::RefreshToken, &artifacts.refresh_token),
        )?;
        audited(
            SessionKey::Authorities,
            store.write_json(SessionKey::Authorities, &artifacts.authorities),
        )?;

        audit_log(SessionEvent::session_established(&artifacts.user.email));
        Ok(())
    }

    /// Clear every stored artifact. Safe to call when no session
    /// exists.
    pub fn logout<S: SessionStore>(store: &S) {
        store.clear_all();
        audit_log(SessionEvent::session_cleared());
    }

    /// The stored identity, if a decodable one is present.
    pub fn current_user<S: SessionStore>(store: &S) -> Option<CurrentUser> {
        store.read_json(SessionKey::CurrentUser)
    }

    /// The stored access token.
    pub fn access_token<S: SessionStore>(store: &S) -> Option<String> {
        store.read(SessionKey::AccessToken)
    }

    /// The stored refresh token.
    pub fn refresh_token<S: SessionStore>(store: &S) -> Option<String> {
        store.read(SessionKey::RefreshToken)
    }

    /// Whether an access token is currently stored.
    ///
    /// Presence only; expiry is the backend's call, surfaced when a
    /// request comes back unauthorized.
    pub fn is_authenticated<S: SessionStore>(store: &S) -> bool {
        store.read(SessionKey::AccessToken).is_some()
    }
}

/// Reports quota failures on the audit channel before handing the
/// error back to the caller.
fn audited(key: SessionKey, result: Result<(), StoreError>) -> Result<(), StoreError> {
    if let Err(StoreError::QuotaExceeded) = &result {
        audit_log(SessionEvent::quota_exceeded(key.as_str()));
    }
    result
}
