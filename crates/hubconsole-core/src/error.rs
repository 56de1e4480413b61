//! Unified error types for HubConsole.
//!
//! Every failure observed by the request pipeline — transport faults,
//! non-2xx statuses, and application-level envelope codes — is mapped
//! into [`ApiError`] for consistent propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed (HTTP 400/422 or a user-domain envelope code).
    Validation,
    /// The session credential is no longer valid (HTTP 401). Always
    /// downgrades the session to anonymous.
    AuthenticationExpired,
    /// The caller's identity is known but the action is forbidden
    /// (HTTP 403). Never changes session state.
    AuthorizationDenied,
    /// The requested resource was not found (HTTP 404).
    NotFound,
    /// A rate limit was exceeded (HTTP 429).
    RateLimited,
    /// A generic server-side error occurred (HTTP 5xx).
    Server,
    /// An upstream gateway returned an invalid response (HTTP 502).
    BadGateway,
    /// The service is temporarily unavailable (HTTP 503).
    ServiceUnavailable,
    /// An upstream gateway timed out (HTTP 504).
    GatewayTimeout,
    /// No response was received (timeout, connection failure).
    Network,
    /// The response envelope was missing expected fields or could not
    /// be decoded.
    MalformedResponse,
    /// The client was misconfigured (bad base URL, invalid request).
    Configuration,
    /// Durable credential storage failed.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::AuthenticationExpired => write!(f, "AUTHENTICATION_EXPIRED"),
            Self::AuthorizationDenied => write!(f, "AUTHORIZATION_DENIED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::RateLimited => write!(f, "RATE_LIMITED"),
            Self::Server => write!(f, "SERVER"),
            Self::BadGateway => write!(f, "BAD_GATEWAY"),
            Self::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
            Self::GatewayTimeout => write!(f, "GATEWAY_TIMEOUT"),
            Self::Network => write!(f, "NETWORK"),
            Self::MalformedResponse => write!(f, "MALFORMED_RESPONSE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Storage => write!(f, "STORAGE"),
        }
    }
}

/// The normalized error produced by the request pipeline and consumed
/// by every caller of the HubConsole client.
///
/// Carries the classified [`ErrorKind`], the user-facing message, and
/// the transport status and/or application envelope code that produced
/// the classification.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// HTTP status of the response, when one was received.
    pub http_status: Option<u16>,
    /// Application-level envelope code, when the failure came from a
    /// decoded response envelope.
    pub api_code: Option<i32>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApiError {
    /// Create a new error with no status or envelope code attached.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
            api_code: None,
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status: None,
            api_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an authentication-expired error.
    pub fn authentication_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthenticationExpired, message)
    }

    /// Create an authorization-denied error.
    pub fn authorization_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthorizationDenied, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a rate-limited error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, message)
    }

    /// Create a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Create a malformed-response error.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Classify a non-2xx HTTP status into an error.
    ///
    /// The mapping follows the pipeline's failure table: 400/422 are
    /// validation errors, 401 expires the session, 403 denies without a
    /// state change, and 5xx statuses are refined where the code allows.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let mut error = Self::new(kind_for_status(status), message);
        error.http_status = Some(status);
        error
    }

    /// Classify an application-level envelope code into an error.
    ///
    /// Codes below 1000 mirror HTTP statuses and use the same table as
    /// [`ApiError::from_status`]. Domain codes map onto the taxonomy:
    /// user-domain codes (1xxx) are validation failures except for
    /// disabled/locked accounts, captcha codes are validation failures,
    /// and token codes (9004-9006) expire the session.
    pub fn from_envelope_code(code: i32, message: impl Into<String>) -> Self {
        let kind = match code {
            100..=599 => kind_for_status(code as u16),
            1003 | 1004 | 9003 => ErrorKind::AuthorizationDenied,
            1000..=1999 => ErrorKind::Validation,
            9001 | 9002 => ErrorKind::Validation,
            9004..=9006 => ErrorKind::AuthenticationExpired,
            _ => ErrorKind::Server,
        };
        let mut error = Self::new(kind, message);
        error.api_code = Some(code);
        error
    }

    /// Attach the HTTP status that produced this error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Whether this error invalidates the current session.
    pub fn is_authentication_expired(&self) -> bool {
        self.kind == ErrorKind::AuthenticationExpired
    }

    /// Whether this error means no response was received at all.
    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    /// Whether this error is a client-side validation failure.
    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

impl Clone for ApiError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            http_status: self.http_status,
            api_code: self.api_code,
            source: None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::MalformedResponse,
            format!("JSON decode error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

/// Maps an HTTP status to its error kind per the pipeline failure table.
fn kind_for_status(status: u16) -> ErrorKind {
    match status {
        400 | 422 => ErrorKind::Validation,
        401 => ErrorKind::AuthenticationExpired,
        403 => ErrorKind::AuthorizationDenied,
        404 => ErrorKind::NotFound,
        429 => ErrorKind::RateLimited,
        502 => ErrorKind::BadGateway,
        503 => ErrorKind::ServiceUnavailable,
        504 => ErrorKind::GatewayTimeout,
        _ => ErrorKind::Server,
    }
}
