//! Shared test helpers: an in-process mock backend speaking the
//! `{code, message, data}` envelope, plus a recording navigator.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};

use hubconsole::{Console, ConsoleConfig, CredentialStorage, Navigator};

/// Mutable behavior knobs for the mock backend.
#[derive(Debug, Default)]
pub struct BackendState {
    /// Access tokens the backend currently accepts.
    pub valid_tokens: Mutex<HashSet<String>>,
    /// Refresh tokens the backend currently accepts.
    pub valid_refresh: Mutex<HashSet<String>>,
    /// When true, `/auth/login` answers with the token-only variant.
    pub token_only_login: Mutex<bool>,
    /// Artificial delay applied to `/auth/logout`.
    pub logout_delay: Mutex<Option<Duration>>,
    /// When set, `/files` answers with this application code.
    pub files_envelope_code: Mutex<Option<(i32, String)>>,
    /// When true, `/files` answers HTTP 403.
    pub deny_files: Mutex<bool>,
    /// Cache-busting `_t` tags observed on `/files`.
    pub seen_tags: Mutex<Vec<u64>>,
    /// Number of `/auth/me` calls served.
    pub profile_calls: AtomicUsize,
}

/// An in-process backend bound to a loopback port.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let state = Arc::new(BackendState::default());
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/me", get(me))
            .route("/api/auth/refresh", post(refresh))
            .route("/api/files", get(files))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Reject every currently issued access token.
    pub fn revoke_access_tokens(&self) {
        self.state.valid_tokens.lock().expect("lock").clear();
    }

    pub fn profile_calls(&self) -> usize {
        self.state.profile_calls.load(Ordering::SeqCst)
    }
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({"code": 200, "message": "ok", "data": data}))
}

fn envelope_error(code: i32, message: &str) -> Json<Value> {
    Json(json!({"code": code, "message": message}))
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "username": "alice",
        "nickname": "Alice",
        "email": "alice@example.com",
        "roles": ["admin"],
        "permissions": ["file:delete", "user:manage"]
    })
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Json<Value> {
    if body["password"] != "correct" {
        return envelope_error(1001, "invalid username or password");
    }
    state
        .valid_tokens
        .lock()
        .expect("lock")
        .insert("T1".to_string());
    state
        .valid_refresh
        .lock()
        .expect("lock")
        .insert("R1".to_string());

    if *state.token_only_login.lock().expect("lock") {
        ok(json!({"token": "T1", "tokenType": "Bearer", "expiresIn": 900}))
    } else {
        ok(json!({
            "accessToken": "T1",
            "refreshToken": "R1",
            "expiresIn": 900,
            "user": user_json()
        }))
    }
}

async fn me(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);
    let authorized = bearer_of(&headers)
        .is_some_and(|token| state.valid_tokens.lock().expect("lock").contains(&token));
    if authorized {
        (StatusCode::OK, ok(user_json()))
    } else {
        (StatusCode::UNAUTHORIZED, envelope_error(401, "unauthorized"))
    }
}

async fn logout(State(state): State<Arc<BackendState>>) -> Json<Value> {
    let delay = *state.logout_delay.lock().expect("lock");
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    state.valid_tokens.lock().expect("lock").clear();
    state.valid_refresh.lock().expect("lock").clear();
    ok(Value::Null)
}

async fn refresh(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Json<Value> {
    let known = body["refreshToken"]
        .as_str()
        .is_some_and(|token| state.valid_refresh.lock().expect("lock").contains(token));
    if known {
        state
            .valid_tokens
            .lock()
            .expect("lock")
            .insert("T2".to_string());
        ok(json!({"token": "T2", "expiresIn": 900}))
    } else {
        envelope_error(9006, "refresh token rejected")
    }
}

async fn files(
    State(state): State<Arc<BackendState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if let Some(tag) = params.get("_t").and_then(|tag| tag.parse().ok()) {
        state.seen_tags.lock().expect("lock").push(tag);
    }
    let authorized = bearer_of(&headers)
        .is_some_and(|token| state.valid_tokens.lock().expect("lock").contains(&token));
    if !authorized {
        return (StatusCode::UNAUTHORIZED, envelope_error(401, "unauthorized"));
    }
    if *state.deny_files.lock().expect("lock") {
        return (StatusCode::FORBIDDEN, envelope_error(403, "forbidden"));
    }
    if let Some((code, message)) = state.files_envelope_code.lock().expect("lock").clone() {
        return (StatusCode::OK, envelope_error(code, &message));
    }
    (StatusCode::OK, ok(json!([])))
}

/// Records redirect requests instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
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

/// Assemble a console against the mock backend over the given storage.
pub fn console_over(
    backend: &MockBackend,
    storage: Arc<dyn CredentialStorage>,
) -> (Console, Arc<RecordingNavigator>) {
    let mut config = ConsoleConfig::default();
    config.api.base_url = backend.base_url();
    config.api.timeout_seconds = 1;
    let navigator = Arc::new(RecordingNavigator::default());
    let console =
        Console::init_with(config, navigator.clone(), storage).expect("console should assemble");
    (console, navigator)
}
