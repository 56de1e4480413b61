//! The bearer credential carried by the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The current session credential.
///
/// Tokens are opaque string carriers. No shape validation is performed
/// here; the backend is the sole authority on token validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived bearer token attached to every authorized API call.
    pub access_token: String,
    /// Longer-lived token used for silent re-authentication.
    pub refresh_token: Option<String>,
    /// Absolute expiry of the access token, when the backend reported one.
    ///
    /// Not persisted across reloads; a rehydrated credential carries
    /// `None` and relies on the backend to reject stale tokens.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential holding only an access token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }
}
