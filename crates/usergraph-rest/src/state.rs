//! Application state for Axum handlers.

use std::sync::Arc;
use usergraph_service::UserService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }
}
