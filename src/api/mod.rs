pub(crate) mod client;
pub(crate) mod health;
pub(crate) mod resource;

use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::Router;

/// Combines all API routes into a single router.
///
/// `/api` and `/client` are the only routed paths; everything else hits
/// the fixed 404.
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route(
            "/api",
            get(resource::api_handler).post(resource::api_handler),
        )
        .route("/client", get(client::client_handler))
        // Fixed response for any unmatched path
        .fallback(any(not_found))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}
