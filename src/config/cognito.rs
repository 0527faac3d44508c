use confique::Config;

/// Configuration for the Cognito user pool acting as the identity provider
#[derive(Debug, Config, Clone, Default)]
pub struct CognitoConfig {
    /// User pool id (e.g. "us-east-1_AbCdEfGhI")
    #[config(env = "M2M_COGNITO_USER_POOL_ID", default = "")]
    pub user_pool_id: String,

    /// App client id registered for the client-credentials flow
    #[config(env = "M2M_COGNITO_CLIENT_ID", default = "")]
    pub client_id: String,

    /// Expected custom scope as "<resource-server>/<scope-name>"
    /// (default: "rest-api/read:api")
    #[config(env = "M2M_COGNITO_SCOPE", default = "rest-api/read:api")]
    pub scope: String,

    /// Hosted domain prefix of the user pool
    #[config(env = "M2M_COGNITO_DOMAIN", default = "")]
    pub domain: String,

    /// AWS region hosting the user pool (default: us-east-1)
    #[config(env = "M2M_COGNITO_REGION", default = "us-east-1")]
    pub region: String,

    /// Override for the issuer base URL. When set, the issuer becomes
    /// "<issuer_base>/<user_pool_id>" instead of the public Cognito endpoint.
    /// Intended for mock servers and LocalStack.
    #[config(env = "M2M_COGNITO_ISSUER_BASE", default = "")]
    pub issuer_base: String,

    /// Override for the hosted-domain base URL. When set, the token endpoint
    /// becomes "<auth_base>/oauth2/token" instead of the public hosted domain.
    #[config(env = "M2M_COGNITO_AUTH_BASE", default = "")]
    pub auth_base: String,

    /// JWKS cache TTL in seconds (default: 3600 = 1 hour)
    #[config(env = "M2M_COGNITO_JWKS_TTL", default = 3600)]
    pub jwks_ttl: u64,
}

impl CognitoConfig {
    /// The issuer URL tokens must carry in their `iss` claim
    pub fn issuer_url(&self) -> String {
        if self.issuer_base.is_empty() {
            format!(
                "https://cognito-idp.{}.amazonaws.com/{}",
                self.region, self.user_pool_id
            )
        } else {
            format!(
                "{}/{}",
                self.issuer_base.trim_end_matches('/'),
                self.user_pool_id
            )
        }
    }

    /// The JWKS document URL published by the issuer
    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer_url())
    }

    /// The hosted domain's OAuth2 token endpoint
    pub fn token_url(&self) -> String {
        if self.auth_base.is_empty() {
            format!(
                "https://{}.auth.{}.amazoncognito.com/oauth2/token",
                self.domain, self.region
            )
        } else {
            format!("{}/oauth2/token", self.auth_base.trim_end_matches('/'))
        }
    }
}
