use crate::config::{AppConfig, SecretsProvider};
use log::warn;
use thiserror::Error;

pub mod aws;
pub mod static_store;

/// Errors that can occur during secret store operations
#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("secret {0:?} has no string value")]
    Empty(String),
    #[error("secret {0:?} is not configured")]
    NotFound(String),
    #[error("secrets provider error: {0}")]
    Aws(String),
}

/// Secret store trait defining the interface for all backends.
///
/// Implementations should be thread-safe (Send + Sync) so the store can be
/// shared across request handlers.
#[async_trait::async_trait]
pub trait SecretBackend: Send + Sync {
    /// Retrieve the string value of a secret
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretsError>;

    /// Performs a health check on the backend.
    ///
    /// For the AWS backend this reads the configured secret, which exercises
    /// both connectivity and the read grant.
    async fn health_check(&self) -> Result<(), String>;
}

/// Secret store implementation that provides a uniform interface regardless
/// of backend. The concrete implementation is chosen at runtime based on the
/// application configuration.
#[derive(Clone)]
pub enum SecretStore {
    /// AWS Secrets Manager backed store
    Aws(aws::AwsSecretStore),
    /// Static store serving a value straight from configuration
    Static(static_store::StaticSecretStore),
}

#[async_trait::async_trait]
impl SecretBackend for SecretStore {
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretsError> {
        match self {
            Self::Aws(store) => store.get_secret(secret_id).await,
            Self::Static(store) => store.get_secret(secret_id).await,
        }
    }

    async fn health_check(&self) -> Result<(), String> {
        match self {
            Self::Aws(store) => store.health_check().await,
            Self::Static(store) => store.health_check().await,
        }
    }
}

/// Factory function to create the appropriate secret store implementation
/// based on configuration.
pub async fn create_secret_store(config: &AppConfig) -> SecretStore {
    match config.secrets.provider {
        SecretsProvider::Aws => SecretStore::Aws(
            aws::AwsSecretStore::new(&config.secrets, &config.cognito.region).await,
        ),
        SecretsProvider::Static => {
            if config.secrets.static_secret.is_empty() {
                warn!("Static secret store selected but no static secret is configured");
            }
            SecretStore::Static(static_store::StaticSecretStore::new(
                config.secrets.static_secret.clone(),
            ))
        }
    }
}
