//! Main application router.

use crate::{
    controllers::{health_controller, relationship_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use usergraph_config::ServerConfig;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .nest("/relationships", relationship_controller::router())
        .with_state(state.clone());

    let router = Router::new()
        // Health endpoints
        .merge(health_controller::router().with_state(state))
        // API v1
        .nest("/api/v1", api_router)
        // Swagger UI and OpenAPI document
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Root endpoint
        .route("/", get(root))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with REST endpoints and Swagger UI at /swagger-ui");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "UserGraph API v1"
}
