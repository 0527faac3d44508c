//! The token-protected resource endpoint.

use crate::openapi::RESOURCE_TAG;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use log::{debug, warn};

const WELCOME_BODY: &str = "Request Valid.  Welcome to my API.";
const MISSING_AUTH_BODY: &str = "Missing Authorization header";
const INVALID_TOKEN_BODY: &str = "Invalid Token";

/// Protected resource handler.
///
/// Requires a bearer access token issued by the configured user pool for the
/// configured client and scope. Every verification failure collapses to the
/// same 401 so callers learn nothing about the verifier's internals; the
/// specific reason is logged.
#[utoipa::path(
    get,
    path = "/api",
    tag = RESOURCE_TAG,
    params(
        ("Authorization" = String, Header, description = "Bearer access token"),
    ),
    responses(
        (status = 200, description = "Token accepted", body = String),
        (status = 401, description = "Missing or invalid token", body = String)
    )
)]
pub(super) async fn api_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return (StatusCode::UNAUTHORIZED, MISSING_AUTH_BODY).into_response();
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();

    match state.verifier.verify(token).await {
        Ok(claims) => {
            debug!(
                "Accepted access token for client {} (sub {})",
                claims.client_id, claims.sub
            );
            (StatusCode::OK, WELCOME_BODY).into_response()
        }
        Err(err) => {
            warn!("Rejected bearer token: {err}");
            (StatusCode::UNAUTHORIZED, INVALID_TOKEN_BODY).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{unix_now, TestFixture};
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let fixture = TestFixture::new().await;
        let response = fixture.get("/api").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.text, MISSING_AUTH_BODY);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let response = fixture.get_with_bearer("/api", "garbage.token.value").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.text, INVALID_TOKEN_BODY);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let response = fixture
            .get_with_header("/api", "Authorization", "Basic dXNlcjpwYXNz")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.text, INVALID_TOKEN_BODY);
    }

    #[tokio::test]
    async fn test_valid_token_is_welcomed() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let token = fixture.mint_access_token();
        let response = fixture.get_with_bearer("/api", &token).await;
        response.assert_ok();
        assert_eq!(response.text, WELCOME_BODY);
    }

    #[tokio::test]
    async fn test_lowercase_authorization_header_is_accepted() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let token = fixture.mint_access_token();
        let response = fixture
            .get_with_header("/api", "authorization", &format!("Bearer {token}"))
            .await;
        response.assert_ok();
        assert_eq!(response.text, WELCOME_BODY);
    }

    #[tokio::test]
    async fn test_post_is_routed_like_get() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let token = fixture.mint_access_token();
        let response = fixture.post_with_bearer("/api", &token).await;
        response.assert_ok();
        assert_eq!(response.text, WELCOME_BODY);
    }

    #[tokio::test]
    async fn test_valid_signature_wrong_scope_is_unauthorized() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let mut claims = fixture.access_claims();
        claims["scope"] = json!("rest-api/write:api");
        let token = crate::test_utils::mint_token(&claims);

        let response = fixture.get_with_bearer("/api", &token).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.text, INVALID_TOKEN_BODY);
    }

    #[tokio::test]
    async fn test_valid_signature_wrong_token_use_is_unauthorized() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let mut claims = fixture.access_claims();
        claims["token_use"] = json!("id");
        let token = crate::test_utils::mint_token(&claims);

        let response = fixture.get_with_bearer("/api", &token).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.text, INVALID_TOKEN_BODY);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let fixture = TestFixture::new().await;
        fixture.mount_jwks().await;

        let mut claims = fixture.access_claims();
        claims["exp"] = json!(unix_now() - 300);
        let token = crate::test_utils::mint_token(&claims);

        let response = fixture.get_with_bearer("/api", &token).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.text, INVALID_TOKEN_BODY);
    }
}
