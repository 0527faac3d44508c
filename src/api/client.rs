//! The client endpoint: token acquisition plus one relayed call.

use crate::errors::ApiError;
use crate::oauth::TokenError;
use crate::openapi::CLIENT_TAG;
use crate::secrets::{SecretBackend, SecretsError};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use thiserror::Error;

/// Failures along the relay path.
///
/// All of them surface to the caller as the same generic client-error
/// envelope; the variants only shape the logged message.
#[derive(Debug, Error)]
enum RelayError {
    #[error("failed to read client secret: {0}")]
    Secret(#[from] SecretsError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("downstream API call failed: {0}")]
    Downstream(#[source] reqwest::Error),
}

/// Client-credentials relay handler.
///
/// Reads the client secret, exchanges it for an access token, calls the
/// protected API once with that token, and returns the downstream body
/// wrapped as a JSON string. Any failure along the way is caught here and
/// returned as a single generic client error; nothing is retried.
#[utoipa::path(
    get,
    path = "/client",
    tag = CLIENT_TAG,
    responses(
        (status = 200, description = "Downstream response, JSON-wrapped", body = String),
        (status = 400, description = "Secret read, token exchange, or relay failure")
    )
)]
pub(super) async fn client_handler(State(state): State<AppState>) -> Response {
    match relay(&state).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            error!("Client-credentials relay failed: {err}");
            ApiError::bad_request(err).into_response()
        }
    }
}

/// The relay sequence: secret, then token, then exactly one downstream call.
async fn relay(state: &AppState) -> Result<String, RelayError> {
    let client_secret = state
        .secrets
        .get_secret(&state.config.secrets.secret_name)
        .await?;

    let token = state.oauth.client_credentials(&client_secret).await?;
    info!("Obtained access token, calling downstream API");

    let response = state
        .relay_client
        .get(&state.config.relay.api_url)
        .bearer_auth(&token.access_token)
        .send()
        .await
        .map_err(RelayError::Downstream)?;

    // The downstream body is relayed as-is, whatever its status
    response.text().await.map_err(RelayError::Downstream)
}
