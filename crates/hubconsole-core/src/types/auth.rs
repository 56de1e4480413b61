//! Authentication request and grant types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::SessionUser;

/// The login form submitted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    /// Plain-text password, sent over TLS.
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    /// Captcha answer, when the backend demanded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
    /// Whether the session should outlive the browser tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

impl LoginRequest {
    /// Create a plain username/password request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            captcha: None,
            remember_me: None,
        }
    }
}

/// The outcome of a successful login call, already mapped from the wire.
///
/// The backend has two login variants: one returns the user inline, the
/// other returns only tokens and requires a separate profile fetch.
/// `user` is `None` in the second case.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    /// The issued access token.
    pub access_token: String,
    /// The issued refresh token, when the variant provides one.
    pub refresh_token: Option<String>,
    /// Absolute access-token expiry, when the variant reports one.
    pub expires_at: Option<DateTime<Utc>>,
    /// The authenticated user, when returned inline.
    pub user: Option<SessionUser>,
}

/// The outcome of a successful silent refresh.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    /// The replacement access token.
    pub access_token: String,
    /// Absolute expiry of the replacement token, when reported.
    pub expires_at: Option<DateTime<Utc>>,
}
