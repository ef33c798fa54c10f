//! Identity artifact for the authenticated user.

use serde::{Deserialize, Serialize};

/// The identity the backend returned for the most recent
/// authentication, persisted under [`SessionKey::CurrentUser`].
///
/// Field names follow the backend's camelCase JSON.
///
/// [`SessionKey::CurrentUser`]: super::store::SessionKey::CurrentUser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Backend identifier.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Profile image location, if one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl CurrentUser {
    /// Create an identity record.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }

    /// Set the avatar location (builder pattern).
    pub fn avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Display name, as shown in user panels.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
