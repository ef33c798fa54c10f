//! # Session Gate
//!
//! Client-side session persistence and role-based feature gating for
//! dashboard front ends talking to a role-issuing REST backend.
//!
//! The backend authenticates a user and hands the client four session
//! artifacts: the user's identity, an access token, a refresh token,
//! and the list of granted authorities. This crate persists those
//! artifacts across reloads and answers, synchronously and without
//! side effects, whether the current session may see a guarded
//! feature.
//!
//! ## Example
//!
//! ```
//! use session_gate_core::session::{
//!     authority, AuthSession, AuthorizationGate, CurrentUser, GrantedAuthority,
//!     LoginArtifacts, MemorySessionStore,
//! };
//!
//! let store = MemorySessionStore::new();
//!
//! // The login flow persists the backend's response.
//! let artifacts = LoginArtifacts {
//!     user: CurrentUser::new("1", "Ada", "Lovelace", "ada@example.com"),
//!     access_token: "eyJ...".to_string(),
//!     refresh_token: "eyK...".to_string(),
//!     authorities: vec![GrantedAuthority::new(authority::ROLE_BASIC)],
//! };
//! AuthSession::login(&store, &artifacts).unwrap();
//!
//! // Rendering code asks the gate per guarded feature.
//! let gate = AuthorizationGate::new(&store);
//! assert!(gate.has_any_role(&[authority::ROLE_BASIC, authority::ROLE_ADMIN]));
//! assert!(!gate.has_any_role(&[authority::ROLE_ADMIN]));
//!
//! // Logout invalidates every subsequent gate evaluation.
//! AuthSession::logout(&store);
//! assert!(!gate.has_any_role(&[authority::ROLE_BASIC]));
//! ```
//!
//! ## Modules
//!
//! - [`session`] - Stores, the authorization gate, session lifecycle,
//!   navigation gating, and audit events
//! - [`error`] - Error types

pub mod error;
pub mod session;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::session::{
        AuthSession, AuthorityList, AuthorizationGate, CurrentUser, FileSessionStore,
        GrantedAuthority, LoginArtifacts, MemorySessionStore, PageItem, SessionKey, SessionStore,
        StoreConfig,
    };
}
