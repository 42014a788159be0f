//! Common test infrastructure for Neo4j integration tests.

use std::sync::Arc;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};
use usergraph_config::DatabaseConfig;
use usergraph_repository::Neo4jGraph;

const NEO4J_PASSWORD: &str = "testpassword";

/// Test graph container wrapper.
///
/// Manages a Neo4j testcontainer lifecycle and provides a connected graph.
pub struct TestGraph {
    _container: ContainerAsync<GenericImage>,
    graph: Arc<Neo4jGraph>,
}

impl TestGraph {
    /// Starts a fresh Neo4j 5 container and connects to it.
    pub async fn new() -> Self {
        let container = GenericImage::new("neo4j", "5.26")
            .with_exposed_port(7687.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Started."))
            .with_env_var("NEO4J_AUTH", format!("neo4j/{NEO4J_PASSWORD}"))
            .start()
            .await
            .expect("Failed to start Neo4j container");

        let port = container
            .get_host_port_ipv4(7687.tcp())
            .await
            .expect("Failed to get Bolt port");

        let config = DatabaseConfig {
            uri: format!("bolt://127.0.0.1:{port}"),
            user: "neo4j".to_string(),
            password: NEO4J_PASSWORD.to_string(),
            name: None,
            max_connections: 4,
            fetch_size: 200,
        };

        let graph = Self::connect_with_retry(&config, 30).await;

        Self {
            _container: container,
            graph: Arc::new(graph),
        }
    }

    /// Returns the shared graph handle.
    pub fn graph(&self) -> Arc<Neo4jGraph> {
        Arc::clone(&self.graph)
    }

    async fn connect_with_retry(config: &DatabaseConfig, max_attempts: u32) -> Neo4jGraph {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match Neo4jGraph::connect(config).await {
                Ok(graph) => {
                    if graph.health_check().await.is_ok() {
                        return graph;
                    }
                    if attempts >= max_attempts {
                        panic!("Neo4j never became healthy after {max_attempts} attempts");
                    }
                }
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!("Failed to connect to Neo4j after {max_attempts} attempts: {e}");
                    }
                }
            }
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
        }
    }
}
