//! Typed wrappers over the backend auth endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use hubconsole_core::error::{ApiError, ErrorKind};
use hubconsole_core::result::ConsoleResult;
use hubconsole_core::traits::AuthGateway;
use hubconsole_core::types::{LoginGrant, LoginRequest, SessionUser, TokenGrant};

use crate::client::ApiClient;
use crate::dto::{self, LoginPayload, RawUser, RefreshPayload};

/// The auth endpoint surface of the request pipeline.
///
/// All calls are issued unguarded: a 401 here is the controller's own
/// business (it may still hold a refresh token), so it must not trip
/// the pipeline's session-invalidation hook.
#[derive(Debug)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    /// Wrap an existing pipeline client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn login(&self, request: &LoginRequest) -> ConsoleResult<LoginGrant> {
        let body = serde_json::to_value(request).map_err(|e| {
            ApiError::with_source(
                ErrorKind::Configuration,
                format!("Failed to encode login request: {e}"),
                e,
            )
        })?;
        let payload: Option<LoginPayload> = self
            .client
            .request(Method::POST, "/auth/login", Some(body), false)
            .await?;
        let payload = payload
            .ok_or_else(|| ApiError::malformed_response("Login response carried no data"))?;
        dto::map_login(payload)
    }

    async fn fetch_profile(&self) -> ConsoleResult<SessionUser> {
        let raw: Option<RawUser> = self
            .client
            .request(Method::GET, "/auth/me", None, false)
            .await?;
        let raw =
            raw.ok_or_else(|| ApiError::malformed_response("Profile response carried no data"))?;
        dto::map_user(raw)
    }

    async fn notify_logout(&self) -> ConsoleResult<()> {
        self.client
            .request::<serde_json::Value>(Method::POST, "/auth/logout", Some(json!({})), false)
            .await?;
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> ConsoleResult<TokenGrant> {
        let body = json!({ "refreshToken": refresh_token });
        let payload: Option<RefreshPayload> = self
            .client
            .request(Method::POST, "/auth/refresh", Some(body), false)
            .await?;
        let payload = payload
            .ok_or_else(|| ApiError::malformed_response("Refresh response carried no data"))?;
        dto::map_refresh(payload)
    }
}
