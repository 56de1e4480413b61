//! The canonical session user and its role/permission codes.
//!
//! The backend has been observed returning more than one "user" shape;
//! the profile-fetch boundary maps all of them into [`SessionUser`] so
//! that the rest of the client sees exactly one.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype code wrapper around `String`.
///
/// Using distinct types prevents accidentally passing a `RoleCode`
/// where a `PermissionCode` is expected.
macro_rules! define_code {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a code from any string-like value.
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Return the code as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

define_code! {
    /// A role code such as `admin` or `viewer`.
    RoleCode
}

define_code! {
    /// A permission code such as `file:delete` or `user:manage`.
    PermissionCode
}

/// The one canonical authenticated-user shape.
///
/// Rebuilt wholesale on every profile fetch; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend user identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Optional display name (the backend calls this `nickname`).
    pub display_name: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional avatar URL.
    pub avatar: Option<String>,
    /// Role codes granted to this user.
    pub roles: BTreeSet<RoleCode>,
    /// Permission codes granted to this user.
    pub permissions: BTreeSet<PermissionCode>,
}

impl SessionUser {
    /// Whether the user holds the given role code.
    pub fn has_role(&self, code: &str) -> bool {
        self.roles.iter().any(|role| role.as_str() == code)
    }

    /// Whether the user holds the given permission code.
    pub fn has_permission(&self, code: &str) -> bool {
        self.permissions.iter().any(|perm| perm.as_str() == code)
    }
}
