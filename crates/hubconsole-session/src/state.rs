//! Derived session state: the current user and the queries over it.

use std::sync::RwLock;

use hubconsole_core::types::SessionUser;

/// Holds the current [`SessionUser`].
///
/// Rebuilt wholesale on every profile fetch; never patched in place.
/// All queries return `false` (never an error) while unauthenticated.
#[derive(Debug, Default)]
pub struct SessionState {
    user: RwLock<Option<SessionUser>>,
}

impl SessionState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clone of the current user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.user.read().expect("session lock poisoned").clone()
    }

    /// Whether a user is present.
    pub fn has_user(&self) -> bool {
        self.user.read().expect("session lock poisoned").is_some()
    }

    /// Replace the user wholesale.
    pub fn replace(&self, user: SessionUser) {
        *self.user.write().expect("session lock poisoned") = Some(user);
    }

    /// Drop the user. Returns whether one was present.
    pub fn clear(&self) -> bool {
        self.user
            .write()
            .expect("session lock poisoned")
            .take()
            .is_some()
    }

    /// Whether the current user holds the given role code.
    pub fn has_role(&self, code: &str) -> bool {
        self.user
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|user| user.has_role(code))
    }

    /// Whether the current user holds the given permission code.
    pub fn has_permission(&self, code: &str) -> bool {
        self.user
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|user| user.has_permission(code))
    }

    /// Whether the current user holds any of the given role codes.
    pub fn has_any_role(&self, codes: &[&str]) -> bool {
        self.user
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|user| codes.iter().any(|code| user.has_role(code)))
    }

    /// Whether the current user holds all of the given role codes.
    pub fn has_all_roles(&self, codes: &[&str]) -> bool {
        self.user
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|user| codes.iter().all(|code| user.has_role(code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubconsole_core::types::{PermissionCode, RoleCode};

    fn user() -> SessionUser {
        SessionUser {
            id: 1,
            username: "alice".to_string(),
            display_name: None,
            email: None,
            avatar: None,
            roles: [RoleCode::new("admin"), RoleCode::new("viewer")]
                .into_iter()
                .collect(),
            permissions: [PermissionCode::new("file:delete")].into_iter().collect(),
        }
    }

    #[test]
    fn test_queries_return_false_while_anonymous() {
        let state = SessionState::new();
        assert!(!state.has_role("admin"));
        assert!(!state.has_permission("file:delete"));
        assert!(!state.has_any_role(&["admin", "viewer"]));
        assert!(!state.has_all_roles(&[]));
        assert!(state.current_user().is_none());
    }

    #[test]
    fn test_queries_over_current_user() {
        let state = SessionState::new();
        state.replace(user());
        assert!(state.has_role("admin"));
        assert!(!state.has_role("manager"));
        assert!(state.has_any_role(&["manager", "viewer"]));
        assert!(state.has_all_roles(&["admin", "viewer"]));
        assert!(!state.has_all_roles(&["admin", "manager"]));
        assert!(state.has_permission("file:delete"));
    }

    #[test]
    fn test_clear_reports_presence() {
        let state = SessionState::new();
        assert!(!state.clear());
        state.replace(user());
        assert!(state.clear());
        assert!(!state.has_user());
    }
}
