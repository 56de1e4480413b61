//! # hubconsole-core
//!
//! Core crate for HubConsole. Contains the port traits, configuration
//! schemas, canonical session types, and the unified error system shared
//! by the request pipeline and the session layer.
//!
//! This crate has **no** internal dependencies on other HubConsole crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{ApiError, ErrorKind};
pub use result::ConsoleResult;
