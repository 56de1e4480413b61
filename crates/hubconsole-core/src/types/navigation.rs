//! Per-navigation records consumed by the navigation guard.

use serde::{Deserialize, Serialize};

/// An ephemeral record describing one pending view transition.
///
/// Consumed exactly once by the guard; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingNavigation {
    /// The target route path.
    pub path: String,
    /// Whether the target view declared that it requires authentication.
    pub requires_auth: bool,
}

impl PendingNavigation {
    /// Create a navigation record for the given path.
    pub fn new(path: impl Into<String>, requires_auth: bool) -> Self {
        Self {
            path: path.into(),
            requires_auth,
        }
    }
}
