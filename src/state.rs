use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::oauth::TokenClient;
use crate::secrets::{SecretBackend, SecretStore};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub verifier: Arc<TokenVerifier>,
    pub secrets: Arc<SecretStore>,
    pub oauth: Arc<TokenClient>,
    pub relay_client: Arc<Client>,
}

impl AppState {
    pub fn new(config: &AppConfig, secrets: SecretStore) -> Self {
        let relay_client = AppState::create_relay_client(
            config.relay.request_timeout,
            config.relay.connect_timeout,
        );
        Self {
            verifier: Arc::new(TokenVerifier::new(relay_client.clone(), &config.cognito)),
            oauth: Arc::new(TokenClient::new(relay_client.clone(), &config.cognito)),
            secrets: Arc::new(secrets),
            relay_client: Arc::new(relay_client),
            config: Arc::new(config.clone()),
        }
    }

    fn create_relay_client(request_timeout: u64, connect_timeout: u64) -> Client {
        // One client serves both the token exchange and the downstream call
        Client::builder()
            .timeout(Duration::from_secs(request_timeout))
            .connect_timeout(Duration::from_secs(connect_timeout))
            // Configure connection pool
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .expect("Failed to create relay HTTP client")
    }

    /// Check if all upstream dependencies are reachable
    pub async fn health_check(&self) -> bool {
        let keys_healthy = self.verifier.health_check().await.is_ok();
        let secrets_healthy = self.secrets.health_check().await.is_ok();
        keys_healthy && secrets_healthy
    }
}
