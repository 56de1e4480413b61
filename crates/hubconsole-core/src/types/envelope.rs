//! The application-level response envelope.
//!
//! Every backend response body is wrapped in this envelope. A transport
//! success with a non-ok `code` is still a failure and is classified by
//! the request pipeline via [`crate::ApiError::from_envelope_code`].

use serde::{Deserialize, Serialize};

/// The envelope code that means "ok".
pub const ENVELOPE_OK: i32 = 200;

/// The standard `{code, message, data}` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application-level status code; `200` is success.
    pub code: i32,
    /// Human-readable message accompanying the code.
    #[serde(default)]
    pub message: String,
    /// The payload, absent on failures and empty-bodied successes.
    pub data: Option<T>,
    /// Server timestamp, when present.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Request path echo, when present.
    #[serde(default)]
    pub path: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope carries a successful application code.
    pub fn is_ok(&self) -> bool {
        self.code == ENVELOPE_OK
    }
}
