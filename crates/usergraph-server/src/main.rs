//! # UserGraph Server
//!
//! Main entry point: loads configuration, initializes logging, connects to
//! Neo4j and serves the REST API.

use tracing::{error, info};
use usergraph_config::DEFAULT_CONFIG_DIR;
use usergraph_server::{
    app::AppBuilder,
    startup::{bootstrap_subscriber, init_logging, load_config, print_banner},
};

#[tokio::main]
async fn main() {
    let loader = match load_config(bootstrap_subscriber(), DEFAULT_CONFIG_DIR) {
        Ok(loader) => loader,
        Err(e) => {
            tracing::subscriber::with_default(bootstrap_subscriber(), || {
                error!("Failed to load configuration: {}", e);
            });
            std::process::exit(1);
        }
    };
    let config = loader.get().await;

    init_logging(&config.observability);
    print_banner();

    info!("Starting UserGraph Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = AppBuilder::new().with_config(config).run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}
