//! Verification of Cognito-issued machine-to-machine access tokens.

use crate::auth::jwks::KeyCache;
use crate::config::cognito::CognitoConfig;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub mod jwks;

/// Claims carried by a Cognito machine-to-machine access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub iss: String,
    pub client_id: String,
    pub scope: String,
    pub token_use: String,
    pub exp: u64,
}

/// Internal reasons a bearer token is rejected.
///
/// Callers of the protected endpoint only ever see a uniform 401; these
/// variants exist for logging.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token header carries no key id")]
    MissingKeyId,
    #[error("no published key matches kid {0:?}")]
    UnknownKey(String),
    #[error("failed to load signing keys: {0}")]
    Jwks(String),
    #[error("token_use is {0:?}, expected \"access\"")]
    TokenUse(String),
    #[error("token was issued to a different client")]
    ClientMismatch,
    #[error("token is missing required scope {0:?}")]
    MissingScope(String),
}

/// Verifier for access tokens issued by the configured user pool.
///
/// Constructed once at startup and shared across requests; the JWKS document
/// is fetched lazily on first use and cached with a TTL.
pub struct TokenVerifier {
    issuer: String,
    jwks_url: String,
    client_id: String,
    scope: String,
    keys: KeyCache,
}

impl TokenVerifier {
    pub fn new(http: reqwest::Client, config: &CognitoConfig) -> Self {
        Self {
            issuer: config.issuer_url(),
            jwks_url: config.jwks_url(),
            client_id: config.client_id.clone(),
            scope: config.scope.clone(),
            keys: KeyCache::new(http, Duration::from_secs(config.jwks_ttl)),
        }
    }

    /// Verifies a bearer token and returns its claims.
    ///
    /// Checks, in order: RS256 signature against the issuer's published key
    /// for the token's `kid`, issuer and expiry, `token_use == "access"`,
    /// the configured client id, and the configured scope.
    pub async fn verify(&self, token: &str) -> Result<AccessClaims, VerifyError> {
        let header = decode_header(token)?;
        let kid = header.kid.ok_or(VerifyError::MissingKeyId)?;

        let jwks = self
            .keys
            .get(&self.jwks_url)
            .await
            .map_err(|e| VerifyError::Jwks(e.to_string()))?;
        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.kid == kid)
            .ok_or_else(|| VerifyError::UnknownKey(kid.clone()))?;

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        // Cognito access tokens carry the client in `client_id`, not `aud`
        validation.validate_aud = false;

        let decoded = decode::<AccessClaims>(token, &key, &validation)?;
        let claims = decoded.claims;

        if claims.token_use != "access" {
            return Err(VerifyError::TokenUse(claims.token_use.clone()));
        }
        if claims.client_id != self.client_id {
            return Err(VerifyError::ClientMismatch);
        }
        if !claims.scope.split_whitespace().any(|s| s == self.scope) {
            return Err(VerifyError::MissingScope(self.scope.clone()));
        }

        Ok(claims)
    }

    /// Checks that the issuer's JWKS document is reachable
    pub async fn health_check(&self) -> Result<(), String> {
        self.keys
            .get(&self.jwks_url)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        mint_token, test_claims, test_jwks_body, unix_now, TEST_CLIENT_ID, TEST_OTHER_RSA_KEY,
        TEST_SCOPE,
    };
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn verifier_with_mock() -> (TokenVerifier, MockServer) {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/us-east-1_TestPool/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(test_jwks_body()))
            .mount(&mock_server)
            .await;

        let config = CognitoConfig {
            user_pool_id: "us-east-1_TestPool".to_string(),
            client_id: TEST_CLIENT_ID.to_string(),
            scope: TEST_SCOPE.to_string(),
            domain: "my-auth-test".to_string(),
            region: "us-east-1".to_string(),
            issuer_base: mock_server.uri(),
            auth_base: mock_server.uri(),
            jwks_ttl: 60,
        };
        (TokenVerifier::new(reqwest::Client::new(), &config), mock_server)
    }

    fn issuer(mock_server: &MockServer) -> String {
        format!("{}/us-east-1_TestPool", mock_server.uri())
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let token = mint_token(&test_claims(&issuer(&mock_server)));

        let claims = verifier.verify(&token).await.expect("token should verify");
        assert_eq!(claims.client_id, TEST_CLIENT_ID);
        assert_eq!(claims.token_use, "access");
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let (verifier, _mock_server) = verifier_with_mock().await;
        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, VerifyError::Jwt(_)));
    }

    #[tokio::test]
    async fn test_wrong_signer_is_rejected() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let token = crate::test_utils::mint_token_with_key(
            &test_claims(&issuer(&mock_server)),
            TEST_OTHER_RSA_KEY,
        );
        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, VerifyError::Jwt(_)));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let mut claims = test_claims(&issuer(&mock_server));
        // Past the default validation leeway
        claims["exp"] = json!(unix_now() - 300);
        let err = verifier.verify(&mint_token(&claims)).await.unwrap_err();
        assert!(matches!(err, VerifyError::Jwt(_)));
    }

    #[tokio::test]
    async fn test_wrong_issuer_is_rejected() {
        let (verifier, _mock_server) = verifier_with_mock().await;
        let token = mint_token(&test_claims("https://cognito-idp.us-east-1.amazonaws.com/other"));
        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, VerifyError::Jwt(_)));
    }

    #[tokio::test]
    async fn test_wrong_token_use_is_rejected() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let mut claims = test_claims(&issuer(&mock_server));
        claims["token_use"] = json!("id");
        let err = verifier.verify(&mint_token(&claims)).await.unwrap_err();
        assert!(matches!(err, VerifyError::TokenUse(_)));
    }

    #[tokio::test]
    async fn test_wrong_client_is_rejected() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let mut claims = test_claims(&issuer(&mock_server));
        claims["client_id"] = json!("some-other-client");
        let err = verifier.verify(&mint_token(&claims)).await.unwrap_err();
        assert!(matches!(err, VerifyError::ClientMismatch));
    }

    #[tokio::test]
    async fn test_missing_scope_is_rejected() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let mut claims = test_claims(&issuer(&mock_server));
        claims["scope"] = json!("rest-api/write:api");
        let err = verifier.verify(&mint_token(&claims)).await.unwrap_err();
        assert!(matches!(err, VerifyError::MissingScope(_)));
    }

    #[tokio::test]
    async fn test_unknown_kid_is_rejected() {
        let (verifier, mock_server) = verifier_with_mock().await;
        let token = crate::test_utils::mint_token_with_kid(
            &test_claims(&issuer(&mock_server)),
            "unknown-key",
        );
        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, VerifyError::UnknownKey(_)));
    }
}
