//! Failure notification port.
//!
//! The pipeline calls this on every classified failure so a hosting
//! shell can surface the message (toast, banner) without the pipeline
//! knowing anything about UI.

use tracing::warn;

use crate::error::ApiError;

/// Receives every failure the request pipeline classifies.
pub trait FailureNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// A request failed with the given normalized error.
    fn notify(&self, error: &ApiError);
}

/// Default notifier that logs failures through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl FailureNotifier for TracingNotifier {
    fn notify(&self, error: &ApiError) {
        warn!(
            kind = %error.kind,
            http_status = ?error.http_status,
            api_code = ?error.api_code,
            "{}",
            error.message
        );
    }
}
