//! Synchronous credential read port for the request pipeline.

/// Source of the bearer token attached to outgoing requests.
///
/// Read synchronously on every request; implemented by the credential
/// store. The pipeline never writes through this port.
pub trait BearerSource: Send + Sync + std::fmt::Debug + 'static {
    /// The current access token, if a credential is held.
    fn bearer_token(&self) -> Option<String>;
}
