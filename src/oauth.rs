//! Client-credentials token exchange against the hosted domain's token endpoint.

use crate::config::cognito::CognitoConfig;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during the token exchange
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("token endpoint returned {status}: {body}")]
    Endpoint { status: StatusCode, body: String },
    #[error("failed to parse token response: {0}")]
    Parse(String),
}

/// Successful token endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The access token string
    pub access_token: String,
    /// Token type - always "Bearer"
    pub token_type: String,
    /// Token expiration in seconds
    pub expires_in: u64,
}

/// Client for the identity provider's OAuth2 token endpoint
pub struct TokenClient {
    http: Client,
    token_url: String,
    client_id: String,
    scope: String,
}

impl TokenClient {
    pub fn new(http: Client, config: &CognitoConfig) -> Self {
        Self {
            http,
            token_url: config.token_url(),
            client_id: config.client_id.clone(),
            scope: config.scope.clone(),
        }
    }

    /// Performs a client-credentials grant and returns the issued token.
    ///
    /// The client authenticates with HTTP Basic credentials built from the
    /// client id and the given secret; the grant parameters travel in the
    /// url-encoded form body.
    pub async fn client_credentials(&self, client_secret: &str) -> Result<TokenResponse, TokenError> {
        debug!(
            "Requesting client-credentials token from {} for client {}",
            self.token_url, self.client_id
        );

        let credentials = BASE64.encode(format!("{}:{}", self.client_id, client_secret));
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {credentials}"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::Endpoint { status, body });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::Parse(e.to_string()))?;

        debug!(
            "Token endpoint issued a {} token expiring in {}s",
            token.token_type, token.expires_in
        );
        Ok(token)
    }
}
