//! Login session: bearer token and selected organization.
//!
//! Storage sits behind `SessionStore` so the plain file store can be swapped
//! for a credential store without touching callers.

mod secret;
mod store;

use std::sync::Arc;

use tracing::debug;

use crate::api::ApiError;

pub use secret::SecureString;
pub use store::{FileSessionStore, MemorySessionStore, SessionError, SessionKey, SessionStore};

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session that is forgotten when the process exits.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Current bearer token, if logged in.
    pub fn token(&self) -> Option<SecureString> {
        self.store
            .get(SessionKey::AccessToken)
            .filter(|token| !token.is_empty())
            .map(SecureString::new)
    }

    /// Bearer token or a local `Unauthenticated` error (no request is made).
    pub fn require_token(&self) -> Result<SecureString, ApiError> {
        self.token().ok_or(ApiError::Unauthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        debug!("storing access token");
        self.store.set(SessionKey::AccessToken, token)
    }

    pub fn selected_organization(&self) -> Option<String> {
        self.store.get(SessionKey::SelectedOrganization)
    }

    pub fn select_organization(&self, organization_id: &str) -> Result<(), SessionError> {
        self.store
            .set(SessionKey::SelectedOrganization, organization_id)
    }

    /// Forget the token and the selected organization.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(SessionKey::AccessToken)?;
        self.store.remove(SessionKey::SelectedOrganization)
    }
}
