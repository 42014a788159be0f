//! Relationship controller.

use crate::{
    responses::{empty_ok, EmptyResult},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// The two ends of a relationship, by case-insensitive name.
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserPairQuery {
    /// Source user name.
    pub username1: String,
    /// Target user name.
    pub username2: String,
}

/// Creates the relationship router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/works-with", post(relate_users))
        .route("/manages", post(relate_users_if_not_related))
}

/// Add a `WORKS_WITH` edge for every matching pair; repeated calls add more edges.
#[utoipa::path(
    post,
    path = "/relationships/works-with",
    tag = "relationships",
    params(UserPairQuery),
    responses(
        (status = 200, description = "Edges created; none when either side is missing"),
        (status = 400, description = "A query parameter is missing")
    )
)]
pub async fn relate_users(
    State(state): State<AppState>,
    Query(pair): Query<UserPairQuery>,
) -> EmptyResult {
    debug!("Relate request: {} -> {}", pair.username1, pair.username2);

    state
        .user_service
        .relate_users(&pair.username1, &pair.username2)
        .await?;
    empty_ok()
}

/// Ensure an `IS_MANAGER_OF` edge exists for every matching pair.
#[utoipa::path(
    post,
    path = "/relationships/manages",
    tag = "relationships",
    params(UserPairQuery),
    responses(
        (status = 200, description = "Edge present after the call"),
        (status = 400, description = "A query parameter is missing")
    )
)]
pub async fn relate_users_if_not_related(
    State(state): State<AppState>,
    Query(pair): Query<UserPairQuery>,
) -> EmptyResult {
    debug!(
        "Relate-if-absent request: {} -> {}",
        pair.username1, pair.username2
    );

    state
        .user_service
        .relate_users_if_not_related(&pair.username1, &pair.username2)
        .await?;
    empty_ok()
}
