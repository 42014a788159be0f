//! In-memory graph implementing [`UserGraphRepository`].
//!
//! Reproduces what the Cypher templates do on a real server: `CREATE` never
//! deduplicates, `MERGE` matches or creates, `MATCH` on two names yields the
//! cartesian product of the matches, and a plain `DELETE` refuses nodes that
//! still have relationships.

use crate::traits::UserGraphRepository;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use usergraph_core::{
    LabeledUser, RelationshipKind, User, UserGraphError, UserGraphResult, UserWithEmployees,
    USER_LABEL,
};

#[derive(Debug, Clone)]
struct StoredNode {
    key: u64,
    labels: Vec<String>,
    user: User,
}

impl StoredNode {
    fn is_user_named(&self, name: &str) -> bool {
        self.is_user() && self.user.name == name
    }

    fn is_user(&self) -> bool {
        self.labels.iter().any(|l| l == USER_LABEL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StoredEdge {
    from: u64,
    to: u64,
    kind: RelationshipKind,
}

#[derive(Debug, Default)]
struct GraphState {
    next_key: u64,
    nodes: Vec<StoredNode>,
    edges: Vec<StoredEdge>,
}

impl GraphState {
    fn insert(&mut self, user: User, labels: Vec<String>) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.nodes.push(StoredNode { key, labels, user });
        key
    }

    fn keys_named(&self, name: &str) -> Vec<u64> {
        self.nodes
            .iter()
            .filter(|n| n.is_user_named(name))
            .map(|n| n.key)
            .collect()
    }

    fn node(&self, key: u64) -> Option<&StoredNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    fn users_matching<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut StoredNode> + 'a {
        self.nodes.iter_mut().filter(move |n| n.is_user_named(name))
    }

    fn pairs(&self, from: &str, to: &str) -> Vec<(u64, u64)> {
        let targets = self.keys_named(to);
        self.keys_named(from)
            .into_iter()
            .flat_map(|a| targets.iter().map(move |&b| (a, b)))
            .collect()
    }
}

/// Thread-safe in-memory stand-in for the Neo4j repository.
#[derive(Debug, Default)]
pub struct InMemoryUserGraph {
    state: RwLock<GraphState>,
    unavailable: AtomicBool,
}

impl InMemoryUserGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like an unreachable server.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Inserts a node with an explicit label set, bypassing normalization.
    pub fn insert_with_labels(&self, user: User, labels: &[&str]) {
        let labels = labels.iter().map(ToString::to_string).collect();
        self.state.write().insert(user, labels);
    }

    /// Number of nodes of any label.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Number of `kind` edges in the graph.
    #[must_use]
    pub fn edge_count(&self, kind: RelationshipKind) -> usize {
        self.state.read().edges.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of `kind` edges from users named `from` to users named `to`.
    #[must_use]
    pub fn edges_between(&self, from: &str, to: &str, kind: RelationshipKind) -> usize {
        let state = self.state.read();
        let pairs = state.pairs(from, to);
        state
            .edges
            .iter()
            .filter(|e| e.kind == kind && pairs.contains(&(e.from, e.to)))
            .count()
    }

    fn ensure_available(&self) -> UserGraphResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserGraphError::database(
                "Connection refused: graph database unavailable",
            ));
        }
        Ok(())
    }

    fn match_users(&self, predicate: impl Fn(&User) -> bool) -> UserGraphResult<Vec<User>> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .nodes
            .iter()
            .filter(|n| n.is_user() && predicate(&n.user))
            .map(|n| n.user.clone())
            .collect())
    }
}

#[async_trait]
impl UserGraphRepository for InMemoryUserGraph {
    async fn find_all(&self) -> UserGraphResult<Vec<User>> {
        self.match_users(|_| true)
    }

    async fn find_by_id(&self, id: i64) -> UserGraphResult<Vec<User>> {
        self.match_users(|u| u.id == id)
    }

    async fn find_with_employees(&self, name: &str) -> UserGraphResult<Vec<UserWithEmployees>> {
        self.ensure_available()?;
        let state = self.state.read();

        let result = state
            .nodes
            .iter()
            .filter(|n| n.is_user_named(name))
            .map(|anchor| {
                let employees: Vec<User> = state
                    .edges
                    .iter()
                    .filter(|e| e.kind == RelationshipKind::EmployeesWith)
                    .filter_map(|e| {
                        if e.from == anchor.key {
                            Some(e.to)
                        } else if e.to == anchor.key {
                            Some(e.from)
                        } else {
                            None
                        }
                    })
                    .filter_map(|key| state.node(key))
                    .filter(|n| n.is_user())
                    .map(|n| n.user.clone())
                    .collect();
                UserWithEmployees {
                    user: anchor.user.clone(),
                    employee_count: i64::try_from(employees.len()).unwrap_or(i64::MAX),
                    employees,
                }
            })
            .collect();

        Ok(result)
    }

    async fn find_with_labels(&self, name: &str) -> UserGraphResult<Vec<LabeledUser>> {
        self.ensure_available()?;
        Ok(self
            .state
            .read()
            .nodes
            .iter()
            .filter(|n| n.is_user_named(name))
            .map(|n| LabeledUser {
                user: n.user.clone(),
                labels: n.labels.clone(),
            })
            .collect())
    }

    async fn create(&self, user: &User) -> UserGraphResult<()> {
        self.ensure_available()?;
        self.state
            .write()
            .insert(user.clone(), vec![USER_LABEL.to_string()]);
        Ok(())
    }

    async fn merge_by_id(&self, user: &User) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();

        let mut matched = false;
        for node in state
            .nodes
            .iter_mut()
            .filter(|n| n.is_user() && n.user.id == user.id)
        {
            node.user = user.clone();
            matched = true;
        }
        if !matched {
            state.insert(user.clone(), vec![USER_LABEL.to_string()]);
        }
        Ok(())
    }

    async fn create_related_to(&self, existing_name: &str, user: &User) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();

        // one CREATE per anchor row
        for anchor in state.keys_named(existing_name) {
            let key = state.insert(user.clone(), vec![USER_LABEL.to_string()]);
            state.edges.push(StoredEdge {
                from: anchor,
                to: key,
                kind: RelationshipKind::EmployeesWith,
            });
        }
        Ok(())
    }

    async fn relate(&self, from: &str, to: &str, kind: RelationshipKind) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();

        for (a, b) in state.pairs(from, to) {
            state.edges.push(StoredEdge { from: a, to: b, kind });
        }
        Ok(())
    }

    async fn relate_once(
        &self,
        from: &str,
        to: &str,
        kind: RelationshipKind,
    ) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();

        for (a, b) in state.pairs(from, to) {
            let edge = StoredEdge { from: a, to: b, kind };
            if !state.edges.contains(&edge) {
                state.edges.push(edge);
            }
        }
        Ok(())
    }

    async fn set_age(&self, name: &str, age: i64) -> UserGraphResult<()> {
        self.ensure_available()?;
        for node in self.state.write().users_matching(name) {
            node.user.age = age;
        }
        Ok(())
    }

    async fn replace(&self, user: &User) -> UserGraphResult<()> {
        self.ensure_available()?;
        for node in self.state.write().users_matching(&user.name) {
            node.user = user.clone();
        }
        Ok(())
    }

    async fn detach_delete(&self, name: &str) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();

        let doomed = state.keys_named(name);
        state
            .edges
            .retain(|e| !doomed.contains(&e.from) && !doomed.contains(&e.to));
        state.nodes.retain(|n| !doomed.contains(&n.key));
        Ok(())
    }

    async fn delete_node(&self, name: &str) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();

        let doomed = state.keys_named(name);
        if let Some(key) = doomed
            .iter()
            .find(|&&k| state.edges.iter().any(|e| e.from == k || e.to == k))
        {
            return Err(UserGraphError::database(format!(
                "Cannot delete node<{key}>, because it still has relationships. \
                 To delete this node, you must first delete its relationships."
            )));
        }
        state.nodes.retain(|n| !doomed.contains(&n.key));
        Ok(())
    }

    async fn delete_all(&self) -> UserGraphResult<()> {
        self.ensure_available()?;
        let mut state = self.state.write();
        state.nodes.clear();
        state.edges.clear();
        Ok(())
    }

    async fn health_check(&self) -> UserGraphResult<()> {
        self.ensure_available()
    }
}
