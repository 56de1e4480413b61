//! Convenience result type alias for HubConsole.

use crate::error::ApiError;

/// A specialized `Result` type for HubConsole operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, ApiError>` explicitly.
pub type ConsoleResult<T> = Result<T, ApiError>;
