//! Neo4j user repository implementation.

use super::statements;
use crate::{traits::UserGraphRepository, Neo4jGraph};
use async_trait::async_trait;
use neo4rs::{query, Query, Row};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use usergraph_core::{
    LabeledUser, RelationshipKind, User, UserGraphError, UserGraphResult, UserWithEmployees,
};

/// Neo4j user repository.
#[derive(Clone)]
pub struct Neo4jUserRepository {
    graph: Arc<Neo4jGraph>,
}

impl Neo4jUserRepository {
    /// Creates a new repository on top of a shared connection.
    #[must_use]
    pub fn new(graph: Arc<Neo4jGraph>) -> Self {
        Self { graph }
    }

    async fn fetch(&self, q: Query) -> UserGraphResult<Vec<Row>> {
        let mut stream = self.graph.inner().execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn run(&self, q: Query) -> UserGraphResult<()> {
        self.graph.inner().run(q).await?;
        Ok(())
    }
}

/// Property map of a `User` node as projected by the read statements.
///
/// Nodes written by other clients may miss properties; those decode to the
/// type's zero value.
#[derive(Debug, Deserialize)]
struct UserNode {
    #[serde(rename = "Id")]
    id: Option<i64>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Age")]
    age: Option<i64>,
    #[serde(rename = "Email")]
    email: Option<String>,
}

impl From<UserNode> for User {
    fn from(node: UserNode) -> Self {
        User {
            id: node.id.unwrap_or_default(),
            name: node.name.unwrap_or_default(),
            age: node.age.unwrap_or_default(),
            email: node.email.unwrap_or_default(),
        }
    }
}

fn column<'r, T: Deserialize<'r>>(row: &'r Row, key: &str) -> UserGraphResult<T> {
    row.get::<T>(key)
        .map_err(|e| UserGraphError::Database(format!("Failed to decode column '{key}': {e}")))
}

fn user_column(row: &Row) -> UserGraphResult<User> {
    column::<UserNode>(row, "user").map(User::from)
}

/// Binds the four user properties used by the write templates.
fn with_user_params(q: Query, user: &User) -> Query {
    q.param("id", user.id)
        .param("name", user.name.as_str())
        .param("age", user.age)
        .param("email", user.email.as_str())
}

#[async_trait]
impl UserGraphRepository for Neo4jUserRepository {
    async fn find_all(&self) -> UserGraphResult<Vec<User>> {
        debug!("Finding all users");

        let rows = self.fetch(query(statements::FIND_ALL)).await?;
        rows.iter().map(user_column).collect()
    }

    async fn find_by_id(&self, id: i64) -> UserGraphResult<Vec<User>> {
        debug!("Finding users by id: {}", id);

        let rows = self
            .fetch(query(statements::FIND_BY_ID).param("id", id))
            .await?;
        rows.iter().map(user_column).collect()
    }

    async fn find_with_employees(&self, name: &str) -> UserGraphResult<Vec<UserWithEmployees>> {
        debug!("Finding user with EMPLOYEES_WITH neighbors: {}", name);

        let rows = self
            .fetch(query(statements::FIND_WITH_EMPLOYEES).param("name", name))
            .await?;

        rows.iter()
            .map(|row| {
                let employees = column::<Vec<UserNode>>(row, "employees")?
                    .into_iter()
                    .map(User::from)
                    .collect();
                Ok(UserWithEmployees {
                    user: user_column(row)?,
                    employees,
                    employee_count: column(row, "employeeCount")?,
                })
            })
            .collect()
    }

    async fn find_with_labels(&self, name: &str) -> UserGraphResult<Vec<LabeledUser>> {
        debug!("Finding user with labels: {}", name);

        let rows = self
            .fetch(query(statements::FIND_WITH_LABELS).param("name", name))
            .await?;

        rows.iter()
            .map(|row| {
                Ok(LabeledUser {
                    user: user_column(row)?,
                    labels: column(row, "labels")?,
                })
            })
            .collect()
    }

    async fn create(&self, user: &User) -> UserGraphResult<()> {
        debug!("Creating user node: id={}, name={}", user.id, user.name);
        self.run(with_user_params(query(statements::CREATE), user)).await
    }

    async fn merge_by_id(&self, user: &User) -> UserGraphResult<()> {
        debug!("Merging user node on id: {}", user.id);
        self.run(with_user_params(query(statements::MERGE_BY_ID), user))
            .await
    }

    async fn create_related_to(&self, existing_name: &str, user: &User) -> UserGraphResult<()> {
        debug!(
            "Creating user {} under existing user {}",
            user.name, existing_name
        );
        let q = with_user_params(query(statements::CREATE_RELATED), user)
            .param("existingName", existing_name);
        self.run(q).await
    }

    async fn relate(&self, from: &str, to: &str, kind: RelationshipKind) -> UserGraphResult<()> {
        debug!("Creating {} edge: {} -> {}", kind, from, to);
        let q = query(&statements::relate(kind))
            .param("name1", from)
            .param("name2", to);
        self.run(q).await
    }

    async fn relate_once(
        &self,
        from: &str,
        to: &str,
        kind: RelationshipKind,
    ) -> UserGraphResult<()> {
        debug!("Merging {} edge: {} -> {}", kind, from, to);
        let q = query(&statements::relate_once(kind))
            .param("name1", from)
            .param("name2", to);
        self.run(q).await
    }

    async fn set_age(&self, name: &str, age: i64) -> UserGraphResult<()> {
        debug!("Setting age of {} to {}", name, age);
        let q = query(statements::SET_AGE)
            .param("name", name)
            .param("age", age);
        self.run(q).await
    }

    async fn replace(&self, user: &User) -> UserGraphResult<()> {
        debug!("Replacing properties of user: {}", user.name);
        self.run(with_user_params(query(statements::REPLACE), user))
            .await
    }

    async fn detach_delete(&self, name: &str) -> UserGraphResult<()> {
        debug!("Detach-deleting user: {}", name);
        self.run(query(statements::DETACH_DELETE).param("name", name))
            .await
    }

    async fn delete_node(&self, name: &str) -> UserGraphResult<()> {
        debug!("Deleting user node: {}", name);
        self.run(query(statements::DELETE_NODE).param("name", name))
            .await
    }

    async fn delete_all(&self) -> UserGraphResult<()> {
        debug!("Deleting all nodes and relationships");
        self.run(query(statements::DELETE_ALL)).await
    }

    async fn health_check(&self) -> UserGraphResult<()> {
        self.graph.health_check().await
    }
}
