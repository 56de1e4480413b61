//! Durable credential persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the credential store persists tokens across reloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Directory holding the persisted credential document.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    ".hubconsole".to_string()
}
