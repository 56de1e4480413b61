//! Session-invalidation port fired by the request pipeline.

/// The only path by which the request pipeline touches session state.
///
/// When a response classifies as authentication-expired, the pipeline
/// notifies this sink instead of mutating the credential store
/// directly. The session controller implements it with its own
/// invalidation transition.
pub trait SessionSink: Send + Sync + 'static {
    /// A response proved the current credential is no longer valid.
    fn authentication_expired(&self);
}
