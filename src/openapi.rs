use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const RESOURCE_TAG: &str = "Protected API";
pub(crate) const CLIENT_TAG: &str = "Client API";

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = RESOURCE_TAG, description = "Token-protected resource endpoint"),
        (name = CLIENT_TAG, description = "Client-credentials relay endpoint"),
    ),
    info(
        title = "m2m-server API",
        description = "Machine-to-machine OAuth2 client-credentials demonstration service",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
