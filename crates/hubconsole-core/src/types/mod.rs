//! Canonical session and wire types shared across HubConsole crates.

pub mod auth;
pub mod credential;
pub mod envelope;
pub mod navigation;
pub mod phase;
pub mod user;

pub use auth::{LoginGrant, LoginRequest, TokenGrant};
pub use credential::Credential;
pub use envelope::ApiEnvelope;
pub use navigation::PendingNavigation;
pub use phase::SessionPhase;
pub use user::{PermissionCode, RoleCode, SessionUser};
