//! Retrieval and caching of the issuer's JSON Web Key Set.

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// A JSON Web Key Set as published by the issuer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwks {
    /// List of keys.
    pub keys: Vec<Jwk>,
}

/// A JSON Web Key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type (e.g., "RSA").
    pub kty: String,
    /// Key ID.
    pub kid: String,
    /// Modulus (Base64URL encoded).
    pub n: String,
    /// Exponent (Base64URL encoded).
    pub e: String,
    /// Algorithm (e.g., "RS256").
    pub alg: String,
    /// Key use (e.g., "sig").
    pub r#use: String,
}

/// Errors that can occur while loading the JWKS document
#[derive(Debug, Error)]
pub enum JwksError {
    #[error("failed to fetch JWKS: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JWKS endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// TTL-bounded in-process cache over the issuer's JWKS document.
///
/// Entries expire after the configured TTL so a key rotation at the issuer
/// is picked up without a restart.
pub struct KeyCache {
    http: reqwest::Client,
    cache: Cache<String, Jwks>,
}

impl KeyCache {
    pub fn new(http: reqwest::Client, ttl: Duration) -> Self {
        Self {
            http,
            cache: Cache::builder().time_to_live(ttl).build(),
        }
    }

    /// Returns the JWKS for `url`, fetching it on a cache miss.
    ///
    /// Concurrent misses for the same URL coalesce into a single fetch.
    pub async fn get(&self, url: &str) -> Result<Jwks, Arc<JwksError>> {
        let http = self.http.clone();
        let fetch_url = url.to_string();
        self.cache
            .try_get_with(url.to_string(), async move {
                let response = http.get(&fetch_url).send().await?;
                if !response.status().is_success() {
                    return Err(JwksError::Status(response.status()));
                }
                let jwks = response.json::<Jwks>().await?;
                Ok(jwks)
            })
            .await
    }
}
