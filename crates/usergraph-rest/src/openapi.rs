//! OpenAPI documentation configuration.

use crate::controllers::health_controller::HealthResponse;
use usergraph_core::{ErrorResponse, RelationshipKind};
use usergraph_service::{UserLabelsResponse, UserPayload, UserResponse, UserWithRelationsResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the UserGraph API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "UserGraph API",
        version = "1.0.0",
        description = "User CRUD and relationship endpoints backed by Neo4j",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::get_users_by_id,
        crate::controllers::user_controller::get_user_with_relations,
        crate::controllers::user_controller::get_user_labels,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::merge_user,
        crate::controllers::user_controller::replace_user,
        crate::controllers::user_controller::update_user_age,
        crate::controllers::user_controller::create_employee,
        crate::controllers::user_controller::delete_user,
        crate::controllers::user_controller::delete_user_node,
        crate::controllers::user_controller::delete_all_users,
        // Relationship endpoints
        crate::controllers::relationship_controller::relate_users,
        crate::controllers::relationship_controller::relate_users_if_not_related,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            RelationshipKind,
            UserPayload,
            UserResponse,
            UserWithRelationsResponse,
            UserLabelsResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "users", description = "User CRUD endpoints"),
        (name = "relationships", description = "Relationship endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
