//! The typed auth endpoint contract consumed by the session controller.

use async_trait::async_trait;

use crate::result::ConsoleResult;
use crate::types::{LoginGrant, LoginRequest, SessionUser, TokenGrant};

/// Typed wrappers over the backend auth endpoints.
///
/// Implemented by the request pipeline's auth API; faked in controller
/// tests. All wire-shape mapping happens behind this trait, so the
/// controller only ever sees canonical types.
#[async_trait]
pub trait AuthGateway: Send + Sync + 'static {
    /// `POST /auth/login` — exchange credentials for a grant.
    async fn login(&self, request: &LoginRequest) -> ConsoleResult<LoginGrant>;

    /// `GET /auth/me` — fetch the current user profile.
    async fn fetch_profile(&self) -> ConsoleResult<SessionUser>;

    /// `POST /auth/logout` — best-effort server-side notification.
    async fn notify_logout(&self) -> ConsoleResult<()>;

    /// `POST /auth/refresh` — obtain a new access token silently.
    async fn refresh(&self, refresh_token: &str) -> ConsoleResult<TokenGrant>;
}
