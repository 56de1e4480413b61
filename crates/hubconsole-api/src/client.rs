//! The HTTP client at the center of the request pipeline.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::time::{Duration, Instant};

use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use hubconsole_core::config::api::ApiConfig;
use hubconsole_core::error::{ApiError, ErrorKind};
use hubconsole_core::result::ConsoleResult;
use hubconsole_core::traits::{BearerSource, FailureNotifier, SessionSink, TracingNotifier};
use hubconsole_core::types::ApiEnvelope;

/// The single choke point for all outbound backend calls.
///
/// Responsibilities, in order: attach the bearer credential read
/// synchronously from the [`BearerSource`], tag the request against
/// intermediate caching, decode the response envelope, and classify
/// every failure. A 401-class failure on a guarded call is routed to
/// the bound [`SessionSink`]; the pipeline never mutates session state
/// directly.
pub struct ApiClient {
    http: Client,
    base_url: String,
    bearer: Arc<dyn BearerSource>,
    session: OnceLock<Weak<dyn SessionSink>>,
    notifier: Arc<dyn FailureNotifier>,
    tag: AtomicU64,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration and a credential source.
    pub fn new(config: &ApiConfig, bearer: Arc<dyn BearerSource>) -> ConsoleResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ApiError::configuration(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                ApiError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer,
            session: OnceLock::new(),
            notifier: Arc::new(TracingNotifier),
            // Seeded from the clock so tags stay distinct across reloads.
            tag: AtomicU64::new(chrono::Utc::now().timestamp_millis() as u64),
        })
    }

    /// Replace the default tracing notifier with an injected one.
    pub fn with_notifier(mut self, notifier: Arc<dyn FailureNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Bind the session sink notified on authentication-expired failures.
    ///
    /// Late-bound and weak: the controller owns the client transitively,
    /// so a strong reference here would cycle. Binding twice is a no-op.
    pub fn bind_session(&self, sink: Weak<dyn SessionSink>) {
        if self.session.set(sink).is_err() {
            warn!("session sink already bound; ignoring rebind");
        }
    }

    /// Issue a GET and decode the envelope payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<T> {
        let data = self.request(Method::GET, path, None, true).await?;
        self.require_data(path, data)
    }

    /// Issue a POST with a JSON body and decode the envelope payload.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ConsoleResult<T> {
        let body = encode_body(body)?;
        let data = self.request(Method::POST, path, Some(body), true).await?;
        self.require_data(path, data)
    }

    /// Issue a POST whose response payload is irrelevant.
    pub async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> ConsoleResult<()> {
        let body = encode_body(body)?;
        self.request::<serde_json::Value>(Method::POST, path, Some(body), true)
            .await?;
        Ok(())
    }

    /// Execute one request through the pipeline.
    ///
    /// `guard_session` controls whether an authentication-expired
    /// classification fires the session sink. The auth endpoints pass
    /// `false`: their outcomes belong to the controller, which must be
    /// free to attempt a silent refresh before giving up.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        guard_session: bool,
    ) -> ConsoleResult<Option<T>> {
        let url = match self.endpoint(path) {
            Ok(url) => url,
            Err(error) => return Err(self.report(&method, path, error)),
        };
        let request_id = Uuid::new_v4();
        let started = Instant::now();

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header("X-Request-Id", request_id.to_string());
        if let Some(token) = self.bearer.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => return Err(self.report(&method, path, classify_transport(error))),
        };

        let status = response.status().as_u16();
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => {
                let error = ApiError::with_source(
                    ErrorKind::Network,
                    format!("Failed to read response body: {error}"),
                    error,
                );
                return Err(self.report(&method, path, error));
            }
        };

        if !(200..300).contains(&status) {
            let message = salvage_message(&text).unwrap_or_else(|| format!("HTTP {status}"));
            let error = ApiError::from_status(status, message);
            if guard_session && error.is_authentication_expired() {
                self.expire_session();
            }
            return Err(self.report(&method, path, error));
        }

        let envelope: ApiEnvelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(error) => {
                let error = ApiError::with_source(
                    ErrorKind::MalformedResponse,
                    format!("Undecodable response envelope: {error}"),
                    error,
                );
                return Err(self.report(&method, path, error));
            }
        };

        if !envelope.is_ok() {
            let error =
                ApiError::from_envelope_code(envelope.code, envelope.message).with_status(status);
            if guard_session && error.is_authentication_expired() {
                self.expire_session();
            }
            return Err(self.report(&method, path, error));
        }

        debug!(
            method = %method,
            path,
            request_id = %request_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        Ok(envelope.data)
    }

    /// Build the full URL for a path, appending the cache-busting tag.
    fn endpoint(&self, path: &str) -> ConsoleResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::configuration(format!("Invalid request path '{path}': {e}")))?;
        url.query_pairs_mut()
            .append_pair("_t", &self.next_tag().to_string());
        Ok(url)
    }

    /// Next monotonically distinct request tag.
    fn next_tag(&self) -> u64 {
        self.tag.fetch_add(1, Ordering::Relaxed)
    }

    fn expire_session(&self) {
        if let Some(sink) = self.session.get().and_then(Weak::upgrade) {
            sink.authentication_expired();
        }
    }

    /// Trace and notify a classified failure before returning it.
    fn report(&self, method: &Method, path: &str, error: ApiError) -> ApiError {
        warn!(
            method = %method,
            path,
            kind = %error.kind,
            http_status = ?error.http_status,
            api_code = ?error.api_code,
            "request failed: {}",
            error.message
        );
        self.notifier.notify(&error);
        error
    }

    fn require_data<T>(&self, path: &str, data: Option<T>) -> ConsoleResult<T> {
        data.ok_or_else(|| {
            let error =
                ApiError::malformed_response(format!("Response for '{path}' carried no data"));
            self.notifier.notify(&error);
            error
        })
    }
}

fn encode_body<B: Serialize>(body: &B) -> ConsoleResult<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| {
        ApiError::with_source(
            ErrorKind::Configuration,
            format!("Failed to encode request body: {e}"),
            e,
        )
    })
}

/// Map a transport-level reqwest failure onto the error taxonomy.
fn classify_transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::with_source(
            ErrorKind::Network,
            format!("Request timed out: {error}"),
            error,
        )
    } else if error.is_connect() {
        ApiError::with_source(
            ErrorKind::Network,
            format!("Connection failed: {error}"),
            error,
        )
    } else if error.is_builder() {
        ApiError::with_source(
            ErrorKind::Configuration,
            format!("Failed to build request: {error}"),
            error,
        )
    } else {
        ApiError::with_source(ErrorKind::Network, format!("Transport error: {error}"), error)
    }
}

/// Pull the server's message out of an error body when it still parses
/// as an envelope.
fn salvage_message(text: &str) -> Option<String> {
    let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(text).ok()?;
    if envelope.message.is_empty() {
        None
    } else {
        Some(envelope.message)
    }
}
