//! Granted authority records and the stored authority list.
//!
//! The backend issues authorities as opaque `ROLE_*` labels and
//! serializes each grant as a `{"authority": "<label>"}` record, the
//! shape its security framework puts on the wire. Labels are not
//! interpreted here; matching is exact, case-sensitive string
//! equality.

use serde::{Deserialize, Serialize};

/// Well-known authority labels issued by the backend.
pub mod authority {
    /// Standard authenticated user.
    pub const ROLE_BASIC: &str = "ROLE_BASIC";
    /// Administrator.
    pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
    /// Read-only guest.
    pub const ROLE_GUEST: &str = "ROLE_GUEST";
}

/// A single granted permission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedAuthority {
    /// The authority label.
    pub authority: String,
}

impl GrantedAuthority {
    /// Create a grant for `authority`.
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }
}

/// The authorities held by the current session.
///
/// Reflects exactly the most recently authenticated user; the login
/// flow overwrites it and logout clears it, never merging across
/// sessions.
///
/// # Example
/// ```
/// use session_gate_core::session::AuthorityList;
///
/// let held = AuthorityList::parse(r#"[{"authority":"ROLE_BASIC"}]"#).unwrap();
/// assert!(held.holds("ROLE_BASIC"));
/// assert!(!held.holds("ROLE_ADMIN"));
/// assert!(held.holds_any(&["ROLE_BASIC", "ROLE_ADMIN"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorityList(Vec<GrantedAuthority>);

impl AuthorityList {
    /// Create a list from granted records.
    pub fn new(authorities: Vec<GrantedAuthority>) -> Self {
        Self(authorities)
    }

    /// Decode a stored authority document.
    ///
    /// Total over its input: any document that is not a sequence of
    /// grant records yields `None`. Callers treat `None` as holding no
    /// authorities, so corrupted storage can only ever deny access.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Whether no authorities are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of held authorities.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `label` is held, by exact string equality.
    pub fn holds(&self, label: &str) -> bool {
        self.0.iter().any(|granted| granted.authority == label)
    }

    /// Whether any of `labels` is held.
    ///
    /// A set-intersection test: the scan may stop at the first match,
    /// and the result does not depend on the order of either side.
    pub fn holds_any<R: AsRef<str>>(&self, labels: &[R]) -> bool {
        labels.iter().any(|label| self.holds(label.as_ref()))
    }

    /// Iterate over the held grants.
    pub fn iter(&self) -> std::slice::Iter<'_, GrantedAuthority> {
        self.0.iter()
    }
}

impl From<Vec<GrantedAuthority>> for AuthorityList {
    fn from(authorities: Vec<GrantedAuthority>) -> Self {
        Self::new(authorities)
    }
}

impl FromIterator<GrantedAuthority> for AuthorityList {
    fn from_iter<I: IntoIterator<Item = GrantedAuthority>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AuthorityList {
    type Item = &'a GrantedAuthority;
    type IntoIter = std::slice::Iter<'a, GrantedAuthority>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
