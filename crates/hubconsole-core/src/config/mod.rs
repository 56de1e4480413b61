//! Client configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod api;
pub mod credentials;
pub mod logging;
pub mod routes;

use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::credentials::CredentialConfig;
use self::logging::LoggingConfig;
use self::routes::RoutesConfig;

use crate::error::ApiError;

/// Root client configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration file and environment overlay. Every section has
/// sensible defaults so an empty file yields a working configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Route entry points used by the navigation guard.
    #[serde(default)]
    pub routes: RoutesConfig,
    /// Durable credential persistence settings.
    #[serde(default)]
    pub credentials: CredentialConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConsoleConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges the file (which may be absent) with environment variables
    /// prefixed with `HUBCONSOLE__`.
    pub fn load(path: &str) -> Result<Self, ApiError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("HUBCONSOLE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ApiError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| ApiError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.routes.login, "/login");
        assert_eq!(config.routes.home, "/dashboard");
        assert_eq!(config.credentials.directory, ".hubconsole");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ConsoleConfig::load("does/not/exist").expect("config should load");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.routes.login, "/login");
    }
}
