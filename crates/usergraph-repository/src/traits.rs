//! Repository trait definitions.

use async_trait::async_trait;
use usergraph_core::{LabeledUser, RelationshipKind, User, UserGraphResult, UserWithEmployees};

/// Graph operations on `User` nodes.
///
/// Each method maps to exactly one statement. Names are matched exactly as
/// given; normalizing them is the caller's job. Mutations that match nothing
/// succeed without effect.
#[async_trait]
pub trait UserGraphRepository: Send + Sync {
    /// Returns every `User` node.
    async fn find_all(&self) -> UserGraphResult<Vec<User>>;

    /// Returns every `User` node whose `Id` equals `id`.
    async fn find_by_id(&self, id: i64) -> UserGraphResult<Vec<User>>;

    /// Returns each user named `name` with its `EMPLOYEES_WITH` neighbors,
    /// following the edge in either direction.
    async fn find_with_employees(&self, name: &str) -> UserGraphResult<Vec<UserWithEmployees>>;

    /// Returns each user named `name` with all of its labels.
    async fn find_with_labels(&self, name: &str) -> UserGraphResult<Vec<LabeledUser>>;

    /// Creates a new node, even if one with the same id exists.
    async fn create(&self, user: &User) -> UserGraphResult<()>;

    /// Merges on `Id` and overwrites every property with `user`.
    async fn merge_by_id(&self, user: &User) -> UserGraphResult<()>;

    /// Creates `user` and an `EMPLOYEES_WITH` edge from each node named
    /// `existing_name` to it, in one statement. No anchor, no new node.
    async fn create_related_to(&self, existing_name: &str, user: &User) -> UserGraphResult<()>;

    /// Creates a `kind` edge from every node named `from` to every node named
    /// `to`, whether or not one exists already.
    async fn relate(&self, from: &str, to: &str, kind: RelationshipKind) -> UserGraphResult<()>;

    /// Like [`relate`](Self::relate), but only where no `kind` edge joins the pair yet.
    async fn relate_once(&self, from: &str, to: &str, kind: RelationshipKind)
        -> UserGraphResult<()>;

    /// Sets `Age` on every node named `name`.
    async fn set_age(&self, name: &str, age: i64) -> UserGraphResult<()>;

    /// Replaces all properties of every node named `user.name` with `user`.
    async fn replace(&self, user: &User) -> UserGraphResult<()>;

    /// Deletes every node named `name` together with its relationships.
    async fn detach_delete(&self, name: &str) -> UserGraphResult<()>;

    /// Deletes every node named `name`; fails if any still has relationships.
    async fn delete_node(&self, name: &str) -> UserGraphResult<()>;

    /// Deletes every node and relationship in the graph.
    async fn delete_all(&self) -> UserGraphResult<()>;

    /// Checks that the graph answers a trivial statement.
    async fn health_check(&self) -> UserGraphResult<()>;
}
