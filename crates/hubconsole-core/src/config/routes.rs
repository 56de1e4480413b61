//! Navigation entry-point configuration.

use serde::{Deserialize, Serialize};

/// Routes the navigation guard redirects to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// The login entry point unauthenticated users are sent to.
    #[serde(default = "default_login")]
    pub login: String,
    /// The default landing route for authenticated users.
    #[serde(default = "default_home")]
    pub home: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            home: default_home(),
        }
    }
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_home() -> String {
    "/dashboard".to_string()
}
