use confique::Config;
use serde::Deserialize;

/// Specifies which secret store backend to use
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SecretsProvider {
    Static,
    #[serde(other)]
    #[default]
    Aws,
}

/// Configuration for the secret store holding the app client secret
#[derive(Debug, Config, Clone, Default)]
pub struct SecretsConfig {
    /// Secret store backend: "aws" or "static" (default: aws)
    #[config(env = "M2M_SECRETS_PROVIDER", default = "aws")]
    pub provider: SecretsProvider,

    /// Name or ARN of the secret holding the client secret
    /// (default: "client-secret")
    #[config(env = "M2M_SECRETS_SECRET_NAME", default = "client-secret")]
    pub secret_name: String,

    /// Endpoint override for the secrets service. Intended for LocalStack;
    /// the default resolves to the public AWS endpoint for the region.
    #[config(env = "M2M_SECRETS_ENDPOINT_URL", default = "")]
    pub endpoint_url: String,

    /// Secret value served by the static backend
    #[config(env = "M2M_SECRETS_STATIC_SECRET", default = "")]
    pub static_secret: String,
}
