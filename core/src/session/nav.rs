//! Navigation entries guarded by required roles.
//!
//! Each drawer or menu entry declares, statically, the set of roles
//! that unlock it. Rendering filters the declared list through the
//! gate on every pass; an entry with no required roles is visible to
//! everyone, including anonymous visitors.

use super::gate::AuthorizationGate;
use super::store::SessionStore;

/// A navigation entry with its access requirement.
///
/// # Example
/// ```
/// use session_gate_core::session::{authority, PageItem};
///
/// let projects = PageItem::new("projects", "/projects")
///     .secondary_url("/projects/new")
///     .required_roles(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]);
///
/// assert!(projects.matches_path("/projects"));
/// assert!(projects.matches_path("/projects/new"));
/// assert!(!projects.matches_path("/articles"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    label: String,
    url: String,
    secondary_url: Option<String>,
    required_roles: Option<Vec<String>>,
}

impl PageItem {
    /// Create an unrestricted entry for `url`.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            secondary_url: None,
            required_roles: None,
        }
    }

    /// Set a secondary target, typically the entry's "create" page
    /// (builder pattern).
    pub fn secondary_url(mut self, url: impl Into<String>) -> Self {
        self.secondary_url = Some(url.into());
        self
    }

    /// Restrict the entry to sessions holding any of `roles`
    /// (builder pattern).
    pub fn required_roles<R: AsRef<str>>(mut self, roles: &[R]) -> Self {
        self.required_roles = Some(roles.iter().map(|role| role.as_ref().to_string()).collect());
        self
    }

    /// Get the label.
    pub fn get_label(&self) -> &str {
        &self.label
    }

    /// Get the primary target.
    pub fn get_url(&self) -> &str {
        &self.url
    }

    /// Get the secondary target.
    pub fn get_secondary_url(&self) -> Option<&str> {
        self.secondary_url.as_deref()
    }

    /// Get the access requirement. `None` means unrestricted.
    pub fn get_required_roles(&self) -> Option<&[String]> {
        self.required_roles.as_deref()
    }

    /// Whether `path` selects this entry (exact match on either
    /// target).
    pub fn matches_path(&self, path: &str) -> bool {
        self.url == path || self.secondary_url.as_deref() == Some(path)
    }
}

/// Filter `items` down to the entries the current session may see,
/// preserving declaration order.
pub fn visible_items<'a, S: SessionStore>(
    gate: &AuthorizationGate<S>,
    items: &'a [PageItem],
) -> Vec<&'a PageItem> {
    items
        .iter()
        .filter(|item| gate.is_authorized(item.get_required_roles()))
        .collect()
}
