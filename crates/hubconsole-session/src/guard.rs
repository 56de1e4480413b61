//! The navigation guard consulted before every view transition.

use std::sync::Arc;

use tracing::debug;

use hubconsole_core::config::routes::RoutesConfig;
use hubconsole_core::types::PendingNavigation;

use crate::controller::SessionController;

/// The guard's verdict on one pending navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the transition commit.
    Proceed,
    /// Send the shell to this route instead. The original destination
    /// is discarded; deep-link preservation is not part of the design.
    Redirect(String),
}

/// Authorizes view transitions against the session controller.
///
/// The decision fully resolves — including any network round trip a
/// session restore needs — before the caller commits the transition,
/// so no view ever mounts in an indeterminate auth state.
#[derive(Debug)]
pub struct NavigationGuard {
    controller: Arc<SessionController>,
    routes: RoutesConfig,
}

impl NavigationGuard {
    /// Build a guard over a controller.
    pub fn new(controller: Arc<SessionController>, routes: RoutesConfig) -> Self {
        Self { controller, routes }
    }

    /// Decide one pending navigation.
    ///
    /// 1. An authenticated user heading to the login entry point is
    ///    sent to the default landing route instead.
    /// 2. A protected target while not authenticated triggers a session
    ///    restore; if that fails the shell is sent to login.
    /// 3. Everything else proceeds.
    pub async fn authorize(&self, navigation: &PendingNavigation) -> GuardDecision {
        if self.controller.is_authenticated() && navigation.path == self.routes.login {
            debug!(path = %navigation.path, "already authenticated; skipping login view");
            return GuardDecision::Redirect(self.routes.home.clone());
        }

        if navigation.requires_auth && !self.controller.is_authenticated() {
            if self.controller.check_auth().await {
                return GuardDecision::Proceed;
            }
            debug!(path = %navigation.path, "unauthenticated; redirecting to login");
            return GuardDecision::Redirect(self.routes.login.clone());
        }

        GuardDecision::Proceed
    }
}

/// The declared route map: path prefix to its `requires_auth` flag.
///
/// Shells use this to build [`PendingNavigation`] records for the
/// guard. Unknown paths resolve as public; the backend still enforces
/// authorization on anything they call.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(String, bool)>,
}

impl RouteTable {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The console's standard routes: login and register are public,
    /// every administration view requires authentication.
    pub fn standard() -> Self {
        Self::new()
            .with_route("/login", false)
            .with_route("/register", false)
            .with_route("/dashboard", true)
            .with_route("/files", true)
            .with_route("/users", true)
            .with_route("/permissions", true)
            .with_route("/database", true)
    }

    /// Declare a route.
    pub fn with_route(mut self, path: impl Into<String>, requires_auth: bool) -> Self {
        self.entries.push((path.into(), requires_auth));
        self
    }

    /// Build the navigation record for a path.
    pub fn resolve(&self, path: &str) -> PendingNavigation {
        let requires_auth = self
            .entries
            .iter()
            .find(|(route, _)| path == route || path.starts_with(&format!("{route}/")))
            .map(|(_, requires_auth)| *requires_auth)
            .unwrap_or(false);
        PendingNavigation::new(path, requires_auth)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
