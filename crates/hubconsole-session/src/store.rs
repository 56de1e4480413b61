//! The credential store: the single shared carrier of the session tokens.

use std::sync::{Arc, RwLock};

use tracing::warn;

use hubconsole_core::result::ConsoleResult;
use hubconsole_core::traits::{BearerSource, CredentialStorage};
use hubconsole_core::types::Credential;

/// Durable key for the access credential.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Durable key for the refresh credential.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Holds the current [`Credential`] and mirrors every change into
/// durable storage so a page reload can rehydrate without a network
/// round trip.
///
/// All writes go through the session controller; the request pipeline
/// only reads, via [`BearerSource`]. Tokens are opaque here: no shape
/// validation is performed.
#[derive(Debug)]
pub struct CredentialStore {
    current: RwLock<Option<Credential>>,
    storage: Arc<dyn CredentialStorage>,
}

impl CredentialStore {
    /// Open the store, rehydrating any persisted credential.
    ///
    /// The expiry timestamp is intentionally not persisted; a
    /// rehydrated credential relies on the backend to reject staleness.
    pub fn new(storage: Arc<dyn CredentialStorage>) -> ConsoleResult<Self> {
        let current = match storage.load(ACCESS_TOKEN_KEY)? {
            Some(access_token) if !access_token.is_empty() => Some(Credential {
                access_token,
                refresh_token: storage.load(REFRESH_TOKEN_KEY)?,
                expires_at: None,
            }),
            _ => None,
        };
        Ok(Self {
            current: RwLock::new(current),
            storage,
        })
    }

    /// The current credential, if any.
    pub fn get(&self) -> Option<Credential> {
        self.current
            .read()
            .expect("credential lock poisoned")
            .clone()
    }

    /// Replace the credential, persisting it before it becomes visible.
    pub fn set(&self, credential: Credential) -> ConsoleResult<()> {
        self.storage
            .store(ACCESS_TOKEN_KEY, &credential.access_token)?;
        match &credential.refresh_token {
            Some(refresh_token) => self.storage.store(REFRESH_TOKEN_KEY, refresh_token)?,
            None => self.storage.remove(REFRESH_TOKEN_KEY)?,
        }
        *self.current.write().expect("credential lock poisoned") = Some(credential);
        Ok(())
    }

    /// Drop the credential.
    ///
    /// The in-memory value is cleared first and unconditionally; a
    /// failing storage removal never leaves a live credential behind.
    pub fn clear(&self) -> ConsoleResult<()> {
        *self.current.write().expect("credential lock poisoned") = None;
        self.storage.remove(ACCESS_TOKEN_KEY)?;
        self.storage.remove(REFRESH_TOKEN_KEY)?;
        Ok(())
    }
}

impl BearerSource for CredentialStore {
    fn bearer_token(&self) -> Option<String> {
        self.current
            .read()
            .expect("credential lock poisoned")
            .as_ref()
            .map(|credential| credential.access_token.clone())
    }
}

/// Clear a store, logging rather than propagating a storage failure.
/// Used by invalidation paths that must always complete locally.
pub(crate) fn clear_logged(store: &CredentialStore) {
    if let Err(error) = store.clear() {
        warn!(kind = %error.kind, "failed to remove persisted credential: {}", error.message);
    }
}
