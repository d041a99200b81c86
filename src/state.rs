//! Shared application state handed to every handler and middleware.

use std::sync::Arc;

use crate::{
    services::{password::Argon2Hasher, token::SessionCodec},
    store::Store,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionCodec>,
    pub passwords: Argon2Hasher,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        sessions: SessionCodec,
        passwords: Argon2Hasher,
        cookie_secure: bool,
    ) -> Self {
        Self {
            store,
            sessions: Arc::new(sessions),
            passwords,
            cookie_secure,
        }
    }
}
