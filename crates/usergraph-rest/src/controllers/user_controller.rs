//! User controller.

use crate::{
    responses::{empty_ok, ok, ApiResult, EmptyResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;
use usergraph_service::{UserLabelsResponse, UserPayload, UserResponse, UserWithRelationsResponse};
use utoipa::IntoParams;

/// Query string of the age update endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AgeQuery {
    /// New age.
    pub age: i64,
}

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(replace_user)
                .delete(delete_all_users),
        )
        .route("/merge", post(merge_user))
        .route("/:id", get(get_users_by_id))
        .route("/by-name/:username", delete(delete_user))
        .route("/by-name/:username/node", delete(delete_user_node))
        .route("/by-name/:username/relations", get(get_user_with_relations))
        .route("/by-name/:username/labels", get(get_user_labels))
        .route("/by-name/:username/age", patch(update_user_age))
        .route("/by-name/:username/employees", post(create_employee))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 500, description = "Graph database error")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request");

    let users = state.user_service.list_users().await?;
    ok(users)
}

/// List every user carrying the given id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id; not unique")),
    responses(
        (status = 200, description = "Matching users, possibly none", body = [UserResponse])
    )
)]
pub async fn get_users_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<UserResponse>> {
    debug!("Get users by id request: {}", id);

    let users = state.user_service.get_users_by_id(id).await?;
    ok(users)
}

/// Get each user with the name and its `EMPLOYEES_WITH` neighbors.
#[utoipa::path(
    get,
    path = "/users/by-name/{username}/relations",
    tag = "users",
    params(("username" = String, Path, description = "Case-insensitive user name")),
    responses(
        (status = 200, description = "One row per matching user", body = [UserWithRelationsResponse])
    )
)]
pub async fn get_user_with_relations(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Vec<UserWithRelationsResponse>> {
    debug!("Get user relations request: {}", username);

    let rows = state.user_service.get_user_with_relations(&username).await?;
    ok(rows)
}

/// Get each user with the name and its node labels.
#[utoipa::path(
    get,
    path = "/users/by-name/{username}/labels",
    tag = "users",
    params(("username" = String, Path, description = "Case-insensitive user name")),
    responses(
        (status = 200, description = "One row per matching user", body = [UserLabelsResponse])
    )
)]
pub async fn get_user_labels(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Vec<UserLabelsResponse>> {
    debug!("Get user labels request: {}", username);

    let rows = state.user_service.get_user_labels(&username).await?;
    ok(rows)
}

/// Create a user node; duplicates are allowed.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 200, description = "User created"),
        (status = 500, description = "Graph database error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> EmptyResult {
    debug!("Create user request: {}", payload.name);

    state.user_service.create_user(payload).await?;
    empty_ok()
}

/// Create a user unless one with the same id exists; an existing one is overwritten.
#[utoipa::path(
    post,
    path = "/users/merge",
    tag = "users",
    request_body = UserPayload,
    responses((status = 200, description = "User merged on id"))
)]
pub async fn merge_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> EmptyResult {
    debug!("Merge user request: id={}", payload.id);

    state.user_service.create_user_if_not_exists(payload).await?;
    empty_ok()
}

/// Replace every property of the users named in the body.
#[utoipa::path(
    put,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses((status = 200, description = "Matching users replaced"))
)]
pub async fn replace_user(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> EmptyResult {
    debug!("Replace user request: {}", payload.name);

    state.user_service.replace_user(payload).await?;
    empty_ok()
}

/// Set the age of every user with the name.
#[utoipa::path(
    patch,
    path = "/users/by-name/{username}/age",
    tag = "users",
    params(
        ("username" = String, Path, description = "Case-insensitive user name"),
        AgeQuery
    ),
    responses(
        (status = 200, description = "Age updated"),
        (status = 400, description = "Age is missing or not an integer")
    )
)]
pub async fn update_user_age(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<AgeQuery>,
) -> EmptyResult {
    debug!("Update age request: {} -> {}", username, query.age);

    state
        .user_service
        .update_user_age(&username, query.age)
        .await?;
    empty_ok()
}

/// Create a user linked by `EMPLOYEES_WITH` from each user with the name.
#[utoipa::path(
    post,
    path = "/users/by-name/{username}/employees",
    tag = "users",
    params(("username" = String, Path, description = "Case-insensitive name of the existing user")),
    request_body = UserPayload,
    responses((status = 200, description = "One new user per matching existing user"))
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<UserPayload>,
) -> EmptyResult {
    debug!("Create employee request: {} under {}", payload.name, username);

    state
        .user_service
        .create_user_related_to(&username, payload)
        .await?;
    empty_ok()
}

/// Delete every user with the name, together with its relationships.
#[utoipa::path(
    delete,
    path = "/users/by-name/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Case-insensitive user name")),
    responses((status = 200, description = "Matching users deleted"))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> EmptyResult {
    debug!("Delete user request: {}", username);

    state.user_service.delete_user(&username).await?;
    empty_ok()
}

/// Delete every user node with the name; fails while relationships remain.
#[utoipa::path(
    delete,
    path = "/users/by-name/{username}/node",
    tag = "users",
    params(("username" = String, Path, description = "Case-insensitive user name")),
    responses(
        (status = 200, description = "Matching nodes deleted"),
        (status = 500, description = "A matching node still has relationships")
    )
)]
pub async fn delete_user_node(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> EmptyResult {
    debug!("Delete user node request: {}", username);

    state.user_service.delete_user_node(&username).await?;
    empty_ok()
}

/// Delete every node and relationship in the database.
#[utoipa::path(
    delete,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "Graph cleared"))
)]
pub async fn delete_all_users(State(state): State<AppState>) -> EmptyResult {
    debug!("Delete all request");

    state.user_service.delete_all().await?;
    empty_ok()
}
