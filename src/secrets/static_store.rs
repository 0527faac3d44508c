use crate::secrets::{SecretBackend, SecretsError};

/// Secret store that serves a single value straight from configuration.
///
/// Intended for local development and tests, where wiring up a real secrets
/// service adds nothing.
#[derive(Clone, Default)]
pub struct StaticSecretStore {
    secret: String,
}

impl StaticSecretStore {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait::async_trait]
impl SecretBackend for StaticSecretStore {
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretsError> {
        if self.secret.is_empty() {
            return Err(SecretsError::NotFound(secret_id.to_string()));
        }
        Ok(self.secret.clone())
    }

    async fn health_check(&self) -> Result<(), String> {
        if self.secret.is_empty() {
            return Err("no static secret configured".to_string());
        }
        Ok(())
    }
}
