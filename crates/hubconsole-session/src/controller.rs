//! The session controller state machine.
//!
//! The only writer of the credential store and the session state.
//! Every failure path resolves to `Anonymous`; the session is never
//! left ambiguous.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};
use validator::Validate;

use hubconsole_core::config::routes::RoutesConfig;
use hubconsole_core::traits::{AuthGateway, Navigator, SessionSink};
use hubconsole_core::types::{Credential, LoginRequest, SessionPhase, SessionUser};

use crate::state::SessionState;
use crate::store::{self, CredentialStore};

/// Orchestrates login, logout, profile refresh, and credential
/// invalidation.
///
/// Writes are ordered so that no reader ever observes a user without a
/// credential: the credential is set before the user on the way up, and
/// the user is cleared before the credential on the way down.
///
/// A generation counter is bumped on every invalidation; async
/// operations capture it before each await and abandon their writes if
/// it moved, so a login or restore that resolves after a logout or 401
/// cannot resurrect the session.
pub struct SessionController {
    store: Arc<CredentialStore>,
    state: Arc<SessionState>,
    gateway: Arc<dyn AuthGateway>,
    navigator: Arc<dyn Navigator>,
    routes: RoutesConfig,
    phase: RwLock<SessionPhase>,
    generation: AtomicU64,
}

impl SessionController {
    /// Assemble a controller over its collaborators.
    ///
    /// The initial phase is `Anonymous` even when a persisted credential
    /// exists; only a successful restore promotes to `Authenticated`.
    pub fn new(
        store: Arc<CredentialStore>,
        state: Arc<SessionState>,
        gateway: Arc<dyn AuthGateway>,
        navigator: Arc<dyn Navigator>,
        routes: RoutesConfig,
    ) -> Self {
        Self {
            store,
            state,
            gateway,
            navigator,
            routes,
            phase: RwLock::new(SessionPhase::Anonymous),
            generation: AtomicU64::new(0),
        }
    }

    /// The currently observable state machine phase.
    pub fn phase(&self) -> SessionPhase {
        *self.phase.read().expect("phase lock poisoned")
    }

    /// Whether a credential and a user profile are both present.
    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_some() && self.state.has_user()
    }

    /// A clone of the current user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.state.current_user()
    }

    /// Whether the current user holds the given permission code.
    /// Returns `false` while anonymous.
    pub fn has_permission(&self, code: &str) -> bool {
        self.state.has_permission(code)
    }

    /// Whether the current user holds the given role code.
    /// Returns `false` while anonymous.
    pub fn has_role(&self, code: &str) -> bool {
        self.state.has_role(code)
    }

    /// Whether the current user holds any of the given role codes.
    pub fn has_any_role(&self, codes: &[&str]) -> bool {
        self.state.has_any_role(codes)
    }

    /// Whether the current user holds all of the given role codes.
    pub fn has_all_roles(&self, codes: &[&str]) -> bool {
        self.state.has_all_roles(codes)
    }

    /// Authenticate with the backend.
    ///
    /// Fails softly: bad credentials, a malformed response, or any
    /// network fault yield `false` with logged detail, never a panic or
    /// an error past this boundary. Login is not considered complete
    /// without a profile; a failed profile fetch drops the freshly
    /// stored credential again.
    pub async fn login(&self, request: &LoginRequest) -> bool {
        if let Err(error) = request.validate() {
            warn!(%error, "login request failed local validation");
            return false;
        }

        let generation = self.generation.load(Ordering::SeqCst);
        self.set_phase(SessionPhase::Authenticating);

        let grant = match self.gateway.login(request).await {
            Ok(grant) => grant,
            Err(error) => {
                warn!(kind = %error.kind, "login failed: {}", error.message);
                self.invalidate_local();
                return false;
            }
        };
        if self.stale(generation) {
            return false;
        }

        let credential = Credential {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: grant.expires_at,
        };
        if let Err(error) = self.store.set(credential) {
            warn!(kind = %error.kind, "failed to persist credential: {}", error.message);
            self.invalidate_local();
            return false;
        }

        let user = match grant.user {
            Some(user) => user,
            None => match self.gateway.fetch_profile().await {
                Ok(user) => user,
                Err(error) => {
                    warn!(kind = %error.kind, "profile fetch after login failed: {}", error.message);
                    self.invalidate_local();
                    return false;
                }
            },
        };
        if self.stale(generation) {
            return false;
        }

        let username = user.username.clone();
        self.state.replace(user);
        self.set_phase(SessionPhase::Authenticated);
        info!(username, "login completed");
        true
    }

    /// Tear down the session.
    ///
    /// The server is notified best-effort; a failing or timed-out
    /// remote call is logged and never blocks local invalidation.
    pub async fn logout(&self) {
        self.set_phase(SessionPhase::Invalidating);
        if let Err(error) = self.gateway.notify_logout().await {
            warn!(kind = %error.kind, "remote logout notification failed: {}", error.message);
        }
        self.invalidate_local();
        info!("logged out");
    }

    /// Restore the session from a persisted credential.
    ///
    /// Idempotent. Without a stored credential this returns `false`
    /// with zero network calls. With one, the profile is fetched; on an
    /// authentication-expired failure with a refresh token at hand, one
    /// silent refresh and one retry are attempted. Any other failure,
    /// including a plain network fault, conservatively drops the
    /// session to `Anonymous`.
    pub async fn check_auth(&self) -> bool {
        let Some(credential) = self.store.get() else {
            return false;
        };

        let generation = self.generation.load(Ordering::SeqCst);
        self.set_phase(SessionPhase::Recovering);

        match self.gateway.fetch_profile().await {
            Ok(user) => self.complete_restore(user, generation),
            Err(error) if error.is_authentication_expired() => {
                match credential.refresh_token {
                    Some(refresh_token) => self.restore_via_refresh(&refresh_token, generation).await,
                    None => {
                        warn!("stored credential rejected and no refresh token held");
                        self.abandon_restore(generation)
                    }
                }
            }
            Err(error) => {
                warn!(kind = %error.kind, "session restore failed: {}", error.message);
                self.abandon_restore(generation)
            }
        }
    }

    /// One silent refresh followed by one profile retry. Never loops.
    async fn restore_via_refresh(&self, refresh_token: &str, generation: u64) -> bool {
        debug!("stored credential rejected; attempting silent refresh");
        let grant = match self.gateway.refresh(refresh_token).await {
            Ok(grant) => grant,
            Err(error) => {
                warn!(kind = %error.kind, "silent refresh failed: {}", error.message);
                return self.abandon_restore(generation);
            }
        };
        if self.stale(generation) {
            return false;
        }

        let credential = Credential {
            access_token: grant.access_token,
            refresh_token: Some(refresh_token.to_string()),
            expires_at: grant.expires_at,
        };
        if let Err(error) = self.store.set(credential) {
            warn!(kind = %error.kind, "failed to persist refreshed credential: {}", error.message);
            return self.abandon_restore(generation);
        }

        match self.gateway.fetch_profile().await {
            Ok(user) => self.complete_restore(user, generation),
            Err(error) => {
                warn!(kind = %error.kind, "profile fetch after refresh failed: {}", error.message);
                self.abandon_restore(generation)
            }
        }
    }

    fn complete_restore(&self, user: SessionUser, generation: u64) -> bool {
        if self.stale(generation) {
            return false;
        }
        self.state.replace(user);
        self.set_phase(SessionPhase::Authenticated);
        true
    }

    /// Fail a restore: invalidate unless a newer invalidation already
    /// owns the state.
    fn abandon_restore(&self, generation: u64) -> bool {
        if !self.stale(generation) {
            self.invalidate_local();
        }
        false
    }

    /// The single invalidation transition.
    ///
    /// Clears the user before the credential, bumps the generation so
    /// in-flight operations abandon their writes, and settles on
    /// `Anonymous`. Returns whether any state was actually dropped,
    /// which deduplicates the 401 redirect.
    pub fn invalidate_local(&self) -> bool {
        self.set_phase(SessionPhase::Invalidating);
        self.generation.fetch_add(1, Ordering::SeqCst);

        let had_credential = self.store.get().is_some();
        let had_user = self.state.clear();
        store::clear_logged(&self.store);

        self.set_phase(SessionPhase::Anonymous);
        had_credential || had_user
    }

    fn stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn set_phase(&self, phase: SessionPhase) {
        debug!(%phase, "session phase");
        *self.phase.write().expect("phase lock poisoned") = phase;
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionSink for SessionController {
    /// A guarded pipeline call observed a 401-class response.
    ///
    /// Routes through the invalidation transition and redirects to the
    /// login entry point, but only when state was actually dropped, so
    /// concurrent 401s produce a single redirect. A 401 observed while
    /// already anonymous clears nothing and requests no redirect.
    fn authentication_expired(&self) {
        if self.invalidate_local() {
            info!("session invalidated by authorization failure; redirecting to login");
            self.navigator.redirect(&self.routes.login);
        }
    }
}
