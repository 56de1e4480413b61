//! Wire-only shapes and their mapping into canonical types.
//!
//! The backend has shipped more than one "user" shape: role and
//! permission lists appear both as flat code strings and as rich
//! objects. Everything is normalized here, at the profile-fetch
//! boundary; an entry that yields no usable code is rejected as a
//! malformed response rather than passed through.

use chrono::{Duration, Utc};
use serde::Deserialize;

use hubconsole_core::error::ApiError;
use hubconsole_core::result::ConsoleResult;
use hubconsole_core::types::{LoginGrant, SessionUser, TokenGrant};

/// Login response payload. Covers both backend variants: the rich one
/// (`accessToken` + `user` inline) and the token-only one (`token`,
/// profile fetched separately).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginPayload {
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<RawUser>,
}

/// Refresh response payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshPayload {
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// User profile as it appears on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawUser {
    pub id: i64,
    pub username: String,
    #[serde(default, alias = "nickname")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<RawCodeRef>,
    #[serde(default)]
    pub permissions: Vec<RawCodeRef>,
}

/// A role or permission entry: either a flat code string or an object
/// carrying `code` and/or `name`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCodeRef {
    Code(String),
    Object {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RawCodeRef {
    /// Resolve to a usable code string.
    fn resolve(self, field: &str) -> ConsoleResult<String> {
        let code = match self {
            Self::Code(code) => Some(code),
            Self::Object { code, name } => code.filter(|c| !c.is_empty()).or(name),
        };
        match code {
            Some(code) if !code.is_empty() => Ok(code),
            _ => Err(ApiError::malformed_response(format!(
                "Profile entry in '{field}' carries neither a code nor a name"
            ))),
        }
    }
}

/// Map a wire user onto the canonical [`SessionUser`].
pub(crate) fn map_user(raw: RawUser) -> ConsoleResult<SessionUser> {
    let roles = raw
        .roles
        .into_iter()
        .map(|entry| entry.resolve("roles").map(Into::into))
        .collect::<ConsoleResult<_>>()?;
    let permissions = raw
        .permissions
        .into_iter()
        .map(|entry| entry.resolve("permissions").map(Into::into))
        .collect::<ConsoleResult<_>>()?;

    Ok(SessionUser {
        id: raw.id,
        username: raw.username,
        display_name: raw.display_name,
        email: raw.email,
        avatar: raw.avatar,
        roles,
        permissions,
    })
}

/// Map a login payload onto a [`LoginGrant`].
///
/// A payload without a usable access token is malformed: login is not
/// considered complete without one.
pub(crate) fn map_login(payload: LoginPayload) -> ConsoleResult<LoginGrant> {
    let access_token = payload
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::malformed_response("Login response carried no usable access token")
        })?;

    let user = payload.user.map(map_user).transpose()?;

    Ok(LoginGrant {
        access_token,
        refresh_token: payload.refresh_token.filter(|token| !token.is_empty()),
        expires_at: payload.expires_in.map(expiry_from_seconds),
        user,
    })
}

/// Map a refresh payload onto a [`TokenGrant`].
pub(crate) fn map_refresh(payload: RefreshPayload) -> ConsoleResult<TokenGrant> {
    let access_token = payload.token.filter(|token| !token.is_empty()).ok_or_else(|| {
        ApiError::malformed_response("Refresh response carried no usable access token")
    })?;

    Ok(TokenGrant {
        access_token,
        expires_at: payload.expires_in.map(expiry_from_seconds),
    })
}

/// Turn a relative `expiresIn` (seconds) into an absolute timestamp.
fn expiry_from_seconds(seconds: i64) -> chrono::DateTime<Utc> {
    Utc::now() + Duration::seconds(seconds)
}
