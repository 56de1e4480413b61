//! # hubconsole-api
//!
//! The outbound request pipeline: the single choke point through which
//! every backend call passes. Attaches the bearer credential, tags
//! requests against intermediate caching, normalizes the response
//! envelope, and classifies every failure into
//! [`hubconsole_core::ApiError`].
//!
//! Also hosts [`AuthApi`], the typed wrappers over the backend auth
//! endpoints implementing [`hubconsole_core::traits::AuthGateway`].

pub mod auth;
pub mod client;
mod dto;

pub use auth::AuthApi;
pub use client::ApiClient;
