//! # hubconsole-session
//!
//! The session layer: durable credential storage, the credential store,
//! derived session state, the session controller state machine, and the
//! navigation guard consulted before every view transition.
//!
//! The controller is the **only** writer of the credential store and
//! the session state; the request pipeline reaches it exclusively
//! through the [`hubconsole_core::traits::SessionSink`] port.

pub mod controller;
pub mod guard;
pub mod state;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use controller::SessionController;
pub use guard::{GuardDecision, NavigationGuard, RouteTable};
pub use state::SessionState;
pub use storage::{FileCredentialStorage, MemoryCredentialStorage};
pub use store::CredentialStore;
