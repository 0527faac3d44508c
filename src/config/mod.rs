pub(crate) use crate::config::secrets::SecretsProvider;
use crate::config::cognito::CognitoConfig;
use crate::config::relay::RelayConfig;
use crate::config::secrets::SecretsConfig;
use confique::Config;

pub mod cognito;
pub mod relay;
pub mod secrets;

/// Main configuration structure for the M2M demo server
#[derive(Debug, Config, Clone, Default)]
pub struct AppConfig {
    /// The port the server will listen to (default: 8080)
    #[config(env = "M2M_PORT", default = 8080)]
    pub port: u16,

    /// Cognito user pool configuration
    #[config(nested)]
    pub cognito: CognitoConfig,

    /// Secret store configuration
    #[config(nested)]
    pub secrets: SecretsConfig,

    /// Relay (client handler) configuration
    #[config(nested)]
    pub relay: RelayConfig,
}

impl AppConfig {
    /// Creates a new config instance from environment variables
    pub fn new() -> Result<Self, String> {
        Self::builder().env().load().map_err(|e| e.to_string())
    }
}
