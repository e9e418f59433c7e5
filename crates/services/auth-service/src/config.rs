//! Auth service configuration.

use common::{DatabaseConfig, JwtConfig};

/// Auth service configuration.
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Token signing key and validity
    pub jwt: JwtConfig,
    /// Credential store connection
    pub database: DatabaseConfig,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }
}
