//! Shared fakes and harness for session-layer tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use hubconsole_core::config::routes::RoutesConfig;
use hubconsole_core::error::ApiError;
use hubconsole_core::result::ConsoleResult;
use hubconsole_core::traits::{AuthGateway, Navigator};
use hubconsole_core::types::{
    Credential, LoginGrant, LoginRequest, PermissionCode, RoleCode, SessionUser, TokenGrant,
};

use crate::SessionController;
use crate::state::SessionState;
use crate::storage::MemoryCredentialStorage;
use crate::store::CredentialStore;

pub(crate) fn admin_user() -> SessionUser {
    SessionUser {
        id: 1,
        username: "alice".to_string(),
        display_name: Some("Alice".to_string()),
        email: None,
        avatar: None,
        roles: [RoleCode::new("admin")].into_iter().collect(),
        permissions: [PermissionCode::new("file:delete")].into_iter().collect(),
    }
}

/// A scripted [`AuthGateway`] with call counters.
///
/// Profile responses are consumed from a queue first, then fall back to
/// `always_profile` when set. When gated, `fetch_profile` parks until
/// [`FakeGateway::release`] is called, which lets tests invalidate the
/// session while a restore is in flight.
#[derive(Default)]
pub(crate) struct FakeGateway {
    login_result: Mutex<Option<Result<LoginGrant, ApiError>>>,
    profile_queue: Mutex<VecDeque<Result<SessionUser, ApiError>>>,
    profile_fallback: Mutex<Option<SessionUser>>,
    refresh_result: Mutex<Option<Result<TokenGrant, ApiError>>>,
    logout_error: Mutex<Option<ApiError>>,
    gate: Option<Arc<Notify>>,
    login_count: AtomicUsize,
    profile_count: AtomicUsize,
    refresh_count: AtomicUsize,
    logout_count: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login_grant(self, access_token: &str, user: Option<SessionUser>) -> Self {
        *self.login_result.lock().expect("lock") = Some(Ok(LoginGrant {
            access_token: access_token.to_string(),
            refresh_token: None,
            expires_at: None,
            user,
        }));
        self
    }

    pub fn with_login_error(self, error: ApiError) -> Self {
        *self.login_result.lock().expect("lock") = Some(Err(error));
        self
    }

    pub fn with_profile(self, result: Result<SessionUser, ApiError>) -> Self {
        self.profile_queue.lock().expect("lock").push_back(result);
        self
    }

    pub fn always_profile(self, user: SessionUser) -> Self {
        *self.profile_fallback.lock().expect("lock") = Some(user);
        self
    }

    pub fn with_refresh_grant(self, access_token: &str) -> Self {
        *self.refresh_result.lock().expect("lock") = Some(Ok(TokenGrant {
            access_token: access_token.to_string(),
            expires_at: None,
        }));
        self
    }

    pub fn with_refresh_error(self, error: ApiError) -> Self {
        *self.refresh_result.lock().expect("lock") = Some(Err(error));
        self
    }

    pub fn with_logout_error(self, error: ApiError) -> Self {
        *self.logout_error.lock().expect("lock") = Some(error);
        self
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn login_calls(&self) -> usize {
        self.login_count.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_count.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_count.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn logout_calls(&self) -> usize {
        self.logout_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthGateway for FakeGateway {
    async fn login(&self, _request: &LoginRequest) -> ConsoleResult<LoginGrant> {
        self.login_count.fetch_add(1, Ordering::SeqCst);
        match self.login_result.lock().expect("lock").clone() {
            Some(result) => result,
            None => Err(ApiError::server("no scripted login response")),
        }
    }

    async fn fetch_profile(&self) -> ConsoleResult<SessionUser> {
        self.profile_count.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(result) = self.profile_queue.lock().expect("lock").pop_front() {
            return result;
        }
        match self.profile_fallback.lock().expect("lock").clone() {
            Some(user) => Ok(user),
            None => Err(ApiError::server("no scripted profile response")),
        }
    }

    async fn notify_logout(&self) -> ConsoleResult<()> {
        self.logout_count.fetch_add(1, Ordering::SeqCst);
        match self.logout_error.lock().expect("lock").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn refresh(&self, _refresh_token: &str) -> ConsoleResult<TokenGrant> {
        self.refresh_count.fetch_add(1, Ordering::SeqCst);
        match self.refresh_result.lock().expect("lock").clone() {
            Some(result) => result,
            None => Err(ApiError::server("no scripted refresh response")),
        }
    }
}

/// Records redirect requests instead of performing them.
#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().expect("lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        self.redirects.lock().expect("lock").push(path.to_string());
    }
}

/// A fully wired controller over in-memory collaborators.
pub(crate) struct TestHarness {
    pub store: Arc<CredentialStore>,
    pub gateway: Arc<FakeGateway>,
    pub navigator: Arc<RecordingNavigator>,
    pub controller: Arc<SessionController>,
}

impl TestHarness {
    pub fn new(gateway: FakeGateway) -> Self {
        let storage = Arc::new(MemoryCredentialStorage::new());
        let store = Arc::new(CredentialStore::new(storage).expect("store"));
        let state = Arc::new(SessionState::new());
        let gateway = Arc::new(gateway);
        let navigator = Arc::new(RecordingNavigator::default());
        let controller = Arc::new(SessionController::new(
            store.clone(),
            state,
            gateway.clone(),
            navigator.clone(),
            RoutesConfig::default(),
        ));
        Self {
            store,
            gateway,
            navigator,
            controller,
        }
    }

    pub fn seed_credential(&self, access_token: &str, refresh_token: Option<&str>) {
        let mut credential = Credential::bearer(access_token);
        credential.refresh_token = refresh_token.map(str::to_string);
        self.store.set(credential).expect("seed credential");
    }
}
