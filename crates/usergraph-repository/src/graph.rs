//! Graph database connection management.

use neo4rs::{query, ConfigBuilder, Graph};
use std::sync::Arc;
use tracing::{info, warn};
use usergraph_config::DatabaseConfig;
use usergraph_core::{UserGraphError, UserGraphResult};

/// Process-wide Neo4j connection.
///
/// Wraps the driver's pooled [`Graph`] handle, which is safe to share across
/// concurrent requests. Created once at startup and handed to repositories.
#[derive(Clone)]
pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    /// Connects to Neo4j using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a database error if the driver configuration is invalid or the
    /// server cannot be reached.
    pub async fn connect(config: &DatabaseConfig) -> UserGraphResult<Self> {
        info!(uri = %config.uri, database = ?config.name, "Connecting to Neo4j...");

        let mut builder = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size);
        if let Some(name) = &config.name {
            builder = builder.db(name.as_str());
        }

        let driver_config = builder
            .build()
            .map_err(|e| UserGraphError::Configuration(format!("Invalid Neo4j settings: {e}")))?;

        let graph = Graph::connect(driver_config).await.map_err(|e| {
            warn!("Failed to connect to Neo4j: {}", e);
            UserGraphError::Database(format!("Failed to connect: {e}"))
        })?;

        let graph = Self { graph };
        graph.health_check().await?;

        info!("Neo4j connection pool established");
        Ok(graph)
    }

    /// Returns the underlying driver handle.
    #[must_use]
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Runs `RETURN 1` to check the connection.
    ///
    /// # Errors
    ///
    /// Returns a database error if the statement fails.
    pub async fn health_check(&self) -> UserGraphResult<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| UserGraphError::Database(format!("Health check failed: {e}")))
    }
}

impl std::fmt::Debug for Neo4jGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jGraph").finish_non_exhaustive()
    }
}

/// Connects and returns a shared graph handle.
///
/// # Errors
///
/// See [`Neo4jGraph::connect`].
pub async fn create_graph(config: &DatabaseConfig) -> UserGraphResult<Arc<Neo4jGraph>> {
    let graph = Neo4jGraph::connect(config).await?;
    Ok(Arc::new(graph))
}
