//! User service implementations.

use crate::dto::{UserLabelsResponse, UserPayload, UserResponse, UserWithRelationsResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use usergraph_core::{normalize_name, RelationshipKind, User, UserGraphResult};
use usergraph_repository::UserGraphRepository;

/// Generic user service over any graph repository.
pub struct UserServiceImpl<R: UserGraphRepository> {
    user_repository: Arc<R>,
}

impl<R: UserGraphRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl<R: UserGraphRepository + 'static> UserService for UserServiceImpl<R> {
    async fn list_users(&self) -> UserGraphResult<Vec<UserResponse>> {
        debug!("Listing all users");
        let users = self.user_repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_users_by_id(&self, id: i64) -> UserGraphResult<Vec<UserResponse>> {
        debug!("Getting users by id: {}", id);
        let users = self.user_repository.find_by_id(id).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user_with_relations(
        &self,
        username: &str,
    ) -> UserGraphResult<Vec<UserWithRelationsResponse>> {
        let name = normalize_name(username);
        debug!("Getting user with relations: {}", name);

        let rows = self.user_repository.find_with_employees(&name).await?;
        Ok(rows.into_iter().map(UserWithRelationsResponse::from).collect())
    }

    async fn get_user_labels(&self, username: &str) -> UserGraphResult<Vec<UserLabelsResponse>> {
        let name = normalize_name(username);
        debug!("Getting user labels: {}", name);

        let rows = self.user_repository.find_with_labels(&name).await?;
        Ok(rows.into_iter().map(UserLabelsResponse::from).collect())
    }

    async fn create_user(&self, payload: UserPayload) -> UserGraphResult<()> {
        let user = User::from(payload).normalized();
        self.user_repository.create(&user).await?;

        info!("User created: id={}, name={}", user.id, user.name);
        Ok(())
    }

    async fn create_user_if_not_exists(&self, payload: UserPayload) -> UserGraphResult<()> {
        let user = User::from(payload).normalized();
        self.user_repository.merge_by_id(&user).await?;

        info!("User merged on id: {}", user.id);
        Ok(())
    }

    async fn create_user_related_to(
        &self,
        existing_username: &str,
        payload: UserPayload,
    ) -> UserGraphResult<()> {
        let existing = normalize_name(existing_username);
        let user = User::from(payload).normalized();
        self.user_repository
            .create_related_to(&existing, &user)
            .await?;

        info!("User {} created as employee of {}", user.name, existing);
        Ok(())
    }

    async fn relate_users(&self, username1: &str, username2: &str) -> UserGraphResult<()> {
        let (from, to) = (normalize_name(username1), normalize_name(username2));
        self.user_repository
            .relate(&from, &to, RelationshipKind::WorksWith)
            .await?;

        info!("Related {} -[WORKS_WITH]-> {}", from, to);
        Ok(())
    }

    async fn relate_users_if_not_related(
        &self,
        username1: &str,
        username2: &str,
    ) -> UserGraphResult<()> {
        let (from, to) = (normalize_name(username1), normalize_name(username2));
        self.user_repository
            .relate_once(&from, &to, RelationshipKind::IsManagerOf)
            .await?;

        info!("Ensured {} -[IS_MANAGER_OF]-> {}", from, to);
        Ok(())
    }

    async fn update_user_age(&self, username: &str, age: i64) -> UserGraphResult<()> {
        let name = normalize_name(username);
        self.user_repository.set_age(&name, age).await?;

        info!("Age of {} set to {}", name, age);
        Ok(())
    }

    async fn replace_user(&self, payload: UserPayload) -> UserGraphResult<()> {
        let user = User::from(payload).normalized();
        self.user_repository.replace(&user).await?;

        info!("User replaced: {}", user.name);
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> UserGraphResult<()> {
        let name = normalize_name(username);
        self.user_repository.detach_delete(&name).await?;

        info!("User deleted with relationships: {}", name);
        Ok(())
    }

    async fn delete_user_node(&self, username: &str) -> UserGraphResult<()> {
        let name = normalize_name(username);
        self.user_repository.delete_node(&name).await?;

        info!("User node deleted: {}", name);
        Ok(())
    }

    async fn delete_all(&self) -> UserGraphResult<()> {
        self.user_repository.delete_all().await?;

        info!("Graph cleared");
        Ok(())
    }

    async fn health_check(&self) -> UserGraphResult<()> {
        self.user_repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use usergraph_core::{LabeledUser, UserGraphError, UserWithEmployees};
    use usergraph_repository::InMemoryUserGraph;

    mock! {
        Repo {}

        #[async_trait]
        impl UserGraphRepository for Repo {
            async fn find_all(&self) -> UserGraphResult<Vec<User>>;
            async fn find_by_id(&self, id: i64) -> UserGraphResult<Vec<User>>;
            async fn find_with_employees(&self, name: &str) -> UserGraphResult<Vec<UserWithEmployees>>;
            async fn find_with_labels(&self, name: &str) -> UserGraphResult<Vec<LabeledUser>>;
            async fn create(&self, user: &User) -> UserGraphResult<()>;
            async fn merge_by_id(&self, user: &User) -> UserGraphResult<()>;
            async fn create_related_to(&self, existing_name: &str, user: &User) -> UserGraphResult<()>;
            async fn relate(&self, from: &str, to: &str, kind: RelationshipKind) -> UserGraphResult<()>;
            async fn relate_once(&self, from: &str, to: &str, kind: RelationshipKind) -> UserGraphResult<()>;
            async fn set_age(&self, name: &str, age: i64) -> UserGraphResult<()>;
            async fn replace(&self, user: &User) -> UserGraphResult<()>;
            async fn detach_delete(&self, name: &str) -> UserGraphResult<()>;
            async fn delete_node(&self, name: &str) -> UserGraphResult<()>;
            async fn delete_all(&self) -> UserGraphResult<()>;
            async fn health_check(&self) -> UserGraphResult<()>;
        }
    }

    fn payload(id: i64, name: &str, age: i64) -> UserPayload {
        UserPayload {
            id,
            name: name.to_string(),
            age,
            email: format!("{}@x.com", name.to_lowercase()),
        }
    }

    fn memory_service() -> (Arc<InMemoryUserGraph>, UserServiceImpl<InMemoryUserGraph>) {
        let graph = Arc::new(InMemoryUserGraph::new());
        (graph.clone(), UserServiceImpl::new(graph))
    }

    #[tokio::test]
    async fn test_create_user_lowercases_name() {
        let mut repo = MockRepo::new();
        repo.expect_create()
            .withf(|user: &User| user.name == "alice" && user.email == "alice@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo));
        service.create_user(payload(1, "ALICE", 30)).await.unwrap();
    }

    #[tokio::test]
    async fn test_relate_users_lowercases_both_names() {
        let mut repo = MockRepo::new();
        repo.expect_relate()
            .withf(|from, to, kind| {
                from == "alice" && to == "bob" && *kind == RelationshipKind::WorksWith
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo));
        service.relate_users("Alice", "BOB").await.unwrap();
    }

    #[tokio::test]
    async fn test_relate_if_not_related_uses_manager_edge() {
        let mut repo = MockRepo::new();
        repo.expect_relate_once()
            .withf(|from, to, kind| {
                from == "alice" && to == "bob" && *kind == RelationshipKind::IsManagerOf
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo));
        service
            .relate_users_if_not_related("aLiCe", "Bob")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_related_lowercases_anchor_and_new_user() {
        let mut repo = MockRepo::new();
        repo.expect_create_related_to()
            .withf(|existing: &str, user: &User| existing == "alice" && user.name == "dave")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo));
        service
            .create_user_related_to("ALICE", payload(4, "Dave", 40))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_age_and_deletes_lowercase_name() {
        let mut repo = MockRepo::new();
        repo.expect_set_age()
            .withf(|name, age| name == "carol" && *age == 41)
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_detach_delete()
            .withf(|name| name == "carol")
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_delete_node()
            .withf(|name| name == "carol")
            .times(1)
            .returning(|_| Ok(()));

        let service = UserServiceImpl::new(Arc::new(repo));
        service.update_user_age("CAROL", 41).await.unwrap();
        service.delete_user("Carol").await.unwrap();
        service.delete_user_node("cArOl").await.unwrap();
    }

    #[tokio::test]
    async fn test_repository_error_propagates_unchanged() {
        let mut repo = MockRepo::new();
        repo.expect_find_all()
            .returning(|| Err(UserGraphError::database("Connection refused")));

        let service = UserServiceImpl::new(Arc::new(repo));
        let err = service.list_users().await.unwrap_err();
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.to_string().contains("Connection refused"));
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let (_, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();

        let by_upper = service.get_user_labels("ALICE").await.unwrap();
        let by_lower = service.get_user_labels("alice").await.unwrap();
        assert_eq!(by_upper.len(), 1);
        assert_eq!(by_upper[0].user, by_lower[0].user);
        assert_eq!(by_upper[0].user.name, "alice");
        assert_eq!(by_upper[0].labels, vec!["User".to_string()]);
    }

    #[tokio::test]
    async fn test_create_twice_yields_duplicates() {
        let (graph, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(service.get_users_by_id(1).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_merge_overwrites_existing_id() {
        let (graph, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();
        service
            .create_user_if_not_exists(payload(1, "Zed", 99))
            .await
            .unwrap();

        assert_eq!(graph.node_count(), 1);
        let users = service.get_users_by_id(1).await.unwrap();
        assert_eq!(users[0].name, "zed");
        assert_eq!(users[0].age, 99);
    }

    #[tokio::test]
    async fn test_relate_counts_edges() {
        let (graph, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();
        service.create_user(payload(2, "Bob", 25)).await.unwrap();

        service.relate_users("alice", "bob").await.unwrap();
        service.relate_users("alice", "bob").await.unwrap();
        assert_eq!(
            graph.edges_between("alice", "bob", RelationshipKind::WorksWith),
            2
        );

        service.relate_users_if_not_related("alice", "bob").await.unwrap();
        service.relate_users_if_not_related("alice", "bob").await.unwrap();
        assert_eq!(
            graph.edges_between("alice", "bob", RelationshipKind::IsManagerOf),
            1
        );
    }

    #[tokio::test]
    async fn test_relate_missing_user_is_silent() {
        let (graph, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();

        service.relate_users("alice", "nobody").await.unwrap();
        assert_eq!(graph.edge_count(RelationshipKind::WorksWith), 0);
    }

    #[tokio::test]
    async fn test_delete_node_with_relationships_fails() {
        let (graph, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();
        service.create_user(payload(2, "Bob", 25)).await.unwrap();
        service.relate_users("alice", "bob").await.unwrap();

        let err = service.delete_user_node("alice").await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert_eq!(graph.node_count(), 2);

        service.delete_user("alice").await.unwrap();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(RelationshipKind::WorksWith), 0);
    }

    #[tokio::test]
    async fn test_replace_wipes_and_sets_properties() {
        let (_, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();
        service
            .replace_user(UserPayload {
                id: 7,
                name: "ALICE".to_string(),
                age: 31,
                email: "new@x.com".to_string(),
            })
            .await
            .unwrap();

        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 7);
        assert_eq!(users[0].age, 31);
        assert_eq!(users[0].email, "new@x.com");
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let (_, service) = memory_service();
        service.create_user(payload(1, "Alice", 30)).await.unwrap();
        service.create_user(payload(2, "Bob", 25)).await.unwrap();
        service.relate_users("alice", "bob").await.unwrap();

        // WORKS_WITH is not followed by the relations read
        let rows = service.get_user_with_relations("alice").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_count, 0);
        assert!(rows[0].employees.is_empty());

        service
            .create_user_related_to("alice", payload(3, "Dave", 40))
            .await
            .unwrap();
        let rows = service.get_user_with_relations("ALICE").await.unwrap();
        assert_eq!(rows[0].employee_count, 1);
        assert_eq!(rows[0].employees[0].name, "dave");

        service.update_user_age("Alice", 31).await.unwrap();
        let users = service.get_users_by_id(1).await.unwrap();
        assert_eq!(users[0].age, 31);

        service.delete_all().await.unwrap();
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_graph_fails_every_call() {
        let (graph, service) = memory_service();
        graph.set_unavailable(true);

        assert!(service.list_users().await.is_err());
        assert!(service.create_user(payload(1, "a", 1)).await.is_err());
        assert!(service.health_check().await.is_err());
    }
}
