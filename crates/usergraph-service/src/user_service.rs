//! User service trait definition.

use crate::dto::{UserLabelsResponse, UserPayload, UserResponse, UserWithRelationsResponse};
use async_trait::async_trait;
use usergraph_core::UserGraphResult;

/// User service trait.
///
/// Every `username` argument is matched case-insensitively: implementations
/// lowercase it, and the name inside every payload, before touching the graph.
/// Mutations succeed whether or not anything matched.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Lists every user.
    async fn list_users(&self) -> UserGraphResult<Vec<UserResponse>>;

    /// Lists every user carrying `id`; ids are not unique.
    async fn get_users_by_id(&self, id: i64) -> UserGraphResult<Vec<UserResponse>>;

    /// Gets each user named `username` with its `EMPLOYEES_WITH` neighbors.
    async fn get_user_with_relations(
        &self,
        username: &str,
    ) -> UserGraphResult<Vec<UserWithRelationsResponse>>;

    /// Gets each user named `username` with its labels.
    async fn get_user_labels(&self, username: &str) -> UserGraphResult<Vec<UserLabelsResponse>>;

    /// Creates a user unconditionally.
    async fn create_user(&self, payload: UserPayload) -> UserGraphResult<()>;

    /// Creates a user, or overwrites every user with the same id.
    async fn create_user_if_not_exists(&self, payload: UserPayload) -> UserGraphResult<()>;

    /// Creates a user linked from each existing user named `existing_username`.
    async fn create_user_related_to(
        &self,
        existing_username: &str,
        payload: UserPayload,
    ) -> UserGraphResult<()>;

    /// Adds a `WORKS_WITH` edge from `username1` to `username2`.
    async fn relate_users(&self, username1: &str, username2: &str) -> UserGraphResult<()>;

    /// Adds an `IS_MANAGER_OF` edge from `username1` to `username2` unless one exists.
    async fn relate_users_if_not_related(
        &self,
        username1: &str,
        username2: &str,
    ) -> UserGraphResult<()>;

    /// Sets the age of every user named `username`.
    async fn update_user_age(&self, username: &str, age: i64) -> UserGraphResult<()>;

    /// Replaces every property of each user named `payload.name`.
    async fn replace_user(&self, payload: UserPayload) -> UserGraphResult<()>;

    /// Deletes each user named `username` and its relationships.
    async fn delete_user(&self, username: &str) -> UserGraphResult<()>;

    /// Deletes each user node named `username`, leaving relationships alone.
    async fn delete_user_node(&self, username: &str) -> UserGraphResult<()>;

    /// Deletes every node and relationship.
    async fn delete_all(&self) -> UserGraphResult<()>;

    /// Checks graph connectivity.
    async fn health_check(&self) -> UserGraphResult<()>;
}
