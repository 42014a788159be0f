//! Application builder.

use axum::Router;
use std::sync::Arc;
use tracing::info;
use usergraph_config::AppConfig;
use usergraph_core::{UserGraphError, UserGraphResult};
use usergraph_repository::{create_graph, Neo4jUserRepository, UserGraphRepository};
use usergraph_rest::{create_router, AppState};
use usergraph_service::UserServiceImpl;

use crate::startup::{print_startup_info, shutdown_signal};

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects to Neo4j, binds the listener and serves until shutdown.
    ///
    /// # Errors
    ///
    /// Fails when the graph connection cannot be opened or the address
    /// cannot be bound.
    pub async fn run(self) -> UserGraphResult<()> {
        let config = self.config.unwrap_or_default();

        let graph = create_graph(&config.database).await?;
        let repository = Arc::new(Neo4jUserRepository::new(graph));
        let router = build_router(repository, &config);

        let addr = config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| UserGraphError::internal(format!("Failed to bind {addr}: {e}")))?;

        print_startup_info(&config);
        info!("Starting REST server on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| UserGraphError::internal(format!("REST server error: {e}")))?;

        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wires repository, service and router.
pub fn build_router<R: UserGraphRepository + 'static>(
    repository: Arc<R>,
    config: &AppConfig,
) -> Router {
    let user_service = Arc::new(UserServiceImpl::new(repository));
    create_router(AppState::new(user_service), &config.server)
}
