use crate::config::secrets::SecretsConfig;
use crate::secrets::{SecretBackend, SecretsError};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_secretsmanager::Client;
use log::debug;

/// Secret store backed by AWS Secrets Manager
#[derive(Clone)]
pub struct AwsSecretStore {
    client: Client,
    secret_name: String,
}

impl AwsSecretStore {
    /// Creates a store using the default AWS credential chain.
    ///
    /// An endpoint override in the configuration redirects the client to a
    /// local stand-in such as LocalStack.
    pub async fn new(config: &SecretsConfig, region: &str) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if !region.is_empty() {
            loader = loader.region(Region::new(region.to_string()));
        }
        if !config.endpoint_url.is_empty() {
            loader = loader.endpoint_url(config.endpoint_url.clone());
        }
        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            secret_name: config.secret_name.clone(),
        }
    }
}

#[async_trait::async_trait]
impl SecretBackend for AwsSecretStore {
    async fn get_secret(&self, secret_id: &str) -> Result<String, SecretsError> {
        debug!("Reading secret {secret_id:?} from Secrets Manager");
        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| SecretsError::Aws(e.to_string()))?;

        output
            .secret_string()
            .map(str::to_owned)
            .ok_or_else(|| SecretsError::Empty(secret_id.to_string()))
    }

    async fn health_check(&self) -> Result<(), String> {
        self.get_secret(&self.secret_name)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
