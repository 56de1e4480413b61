//! Durable key-value persistence port for credentials.

use crate::result::ConsoleResult;

/// Durable storage backing the credential store.
///
/// Two string-valued keys are persisted: the access credential and the
/// refresh credential. Writes must be durable before returning so a
/// reload can rehydrate without a network round trip.
pub trait CredentialStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Load the value stored under `key`, if any.
    fn load(&self, key: &str) -> ConsoleResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> ConsoleResult<()>;

    /// Remove the value stored under `key`, if any.
    fn remove(&self, key: &str) -> ConsoleResult<()>;
}
