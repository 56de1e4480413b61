//! Observable session controller phases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The session state machine phase.
///
/// `Anonymous` is both the initial and the terminal state; every
/// failure path in the controller resolves back to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No credential and no user.
    #[default]
    Anonymous,
    /// A login call is in flight.
    Authenticating,
    /// A credential and a user profile are both present.
    Authenticated,
    /// A silent session restore (profile fetch from a persisted
    /// credential) is in flight.
    Recovering,
    /// Local state is being torn down.
    Invalidating,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticating => write!(f, "authenticating"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Recovering => write!(f, "recovering"),
            Self::Invalidating => write!(f, "invalidating"),
        }
    }
}
