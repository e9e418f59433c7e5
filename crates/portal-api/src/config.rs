//! Portal API configuration.

use auth_service_lib::config::AuthServiceConfig;
use common::ServiceConfig;

use crate::cli::ServeArgs;

/// Everything the server needs at startup.
#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    pub server: ServiceConfig,
    pub auth: AuthServiceConfig,
}

impl PortalConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServiceConfig::from_env(),
            auth: AuthServiceConfig::from_env(),
        }
    }

    /// Command-line flags win over the environment.
    pub fn apply_serve_args(&mut self, args: &ServeArgs) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
    }
}
