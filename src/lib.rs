//! # hubconsole
//!
//! The client-side session and request-authorization layer of the
//! HubConsole admin console. Assembles the request pipeline, the
//! credential store, the session controller, and the navigation guard
//! into one [`Console`] a hosting shell owns for its lifetime.
//!
//! The shell injects its router as a [`Navigator`]; the console's only
//! externally observable surface is the HTTP calls it issues, the
//! redirects it requests through that port, and the credential document
//! it persists.

pub mod logging;

use std::sync::{Arc, Weak};

pub use hubconsole_core::config::ConsoleConfig;
pub use hubconsole_core::error::{ApiError, ErrorKind};
pub use hubconsole_core::result::ConsoleResult;
pub use hubconsole_core::traits::{
    AuthGateway, BearerSource, CredentialStorage, FailureNotifier, Navigator, SessionSink,
    TracingNotifier,
};
pub use hubconsole_core::types::{
    Credential, LoginRequest, PendingNavigation, PermissionCode, RoleCode, SessionPhase,
    SessionUser,
};

pub use hubconsole_api::{ApiClient, AuthApi};
pub use hubconsole_session::{
    CredentialStore, FileCredentialStorage, GuardDecision, MemoryCredentialStorage,
    NavigationGuard, RouteTable, SessionController, SessionState,
};

/// The assembled session layer.
///
/// Construction wires the pipeline's session sink to the controller
/// with a weak reference, so a 401 on any feature call routes through
/// the controller's invalidation transition and nothing else ever
/// writes session state.
#[derive(Debug)]
pub struct Console {
    config: ConsoleConfig,
    client: Arc<ApiClient>,
    controller: Arc<SessionController>,
    guard: NavigationGuard,
    routes: RouteTable,
    navigator: Arc<dyn Navigator>,
}

impl Console {
    /// Initialize with file-backed credential persistence from the
    /// configured directory.
    pub fn init(config: ConsoleConfig, navigator: Arc<dyn Navigator>) -> ConsoleResult<Self> {
        let storage = Arc::new(FileCredentialStorage::new(&config.credentials.directory)?);
        Self::init_with(config, navigator, storage)
    }

    /// Initialize over an injected credential storage backend.
    pub fn init_with(
        config: ConsoleConfig,
        navigator: Arc<dyn Navigator>,
        storage: Arc<dyn CredentialStorage>,
    ) -> ConsoleResult<Self> {
        let store = Arc::new(CredentialStore::new(storage)?);
        let state = Arc::new(SessionState::new());
        let client = Arc::new(ApiClient::new(&config.api, store.clone())?);
        let gateway = Arc::new(AuthApi::new(client.clone()));
        let controller = Arc::new(SessionController::new(
            store,
            state,
            gateway,
            navigator.clone(),
            config.routes.clone(),
        ));

        let sink_arc: Arc<dyn SessionSink> = controller.clone();
        let sink: Weak<dyn SessionSink> = Arc::downgrade(&sink_arc);
        client.bind_session(sink);

        let guard = NavigationGuard::new(controller.clone(), config.routes.clone());

        Ok(Self {
            config,
            client,
            controller,
            guard,
            routes: RouteTable::standard(),
            navigator,
        })
    }

    /// Replace the standard route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The request pipeline. Feature modules issue all their calls
    /// through this client.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// The session controller.
    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }

    /// The navigation guard.
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// The declared route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Authenticate with the backend. See [`SessionController::login`].
    pub async fn login(&self, request: &LoginRequest) -> bool {
        self.controller.login(request).await
    }

    /// Tear down the session. See [`SessionController::logout`].
    pub async fn logout(&self) {
        self.controller.logout().await;
    }

    /// Restore the session from a persisted credential.
    /// See [`SessionController::check_auth`].
    pub async fn check_auth(&self) -> bool {
        self.controller.check_auth().await
    }

    /// Whether a credential and a user profile are both present.
    pub fn is_authenticated(&self) -> bool {
        self.controller.is_authenticated()
    }

    /// Resolve a path against the route table, authorize it, and apply
    /// any redirect through the injected navigator.
    ///
    /// Fully resolves — including a session-restore round trip — before
    /// returning, so the shell never commits a view in an indeterminate
    /// auth state.
    pub async fn navigate(&self, path: &str) -> GuardDecision {
        let navigation = self.routes.resolve(path);
        let decision = self.guard.authorize(&navigation).await;
        if let GuardDecision::Redirect(target) = &decision {
            self.navigator.redirect(target);
        }
        decision
    }
}
