//! Server startup utilities.

use tokio::signal;
use tracing::{error, info, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use usergraph_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use usergraph_core::UserGraphResult;

fn env_filter(observability: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(observability.default_filter()))
}

/// Subscriber used while the configuration itself is being loaded.
#[must_use]
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync {
    fmt()
        .with_env_filter(env_filter(&ObservabilityConfig::default()))
        .with_target(true)
        .finish()
}

/// Loads configuration from `config_dir` with `subscriber` active, so the
/// loader's own events are emitted before global logging exists.
///
/// # Errors
///
/// See [`ConfigLoader::new`].
pub fn load_config<S>(subscriber: S, config_dir: &str) -> UserGraphResult<ConfigLoader>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::with_default(subscriber, || ConfigLoader::new(config_dir))
}

/// Installs the global subscriber: pretty or JSON lines per `log_format`.
pub fn init_logging(observability: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(observability));

    if observability.is_json() {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r"
  _   _                 ____                 _
 | | | |___  ___ _ __ / ___|_ __ __ _ _ __ | |__
 | | | / __|/ _ \ '__| |  _| '__/ _` | '_ \| '_ \
 | |_| \__ \  __/ |  | |_| | | | (_| | |_) | | | |
  \___/|___/\___|_|   \____|_|  \__,_| .__/|_| |_|
                                     |_|
    "
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    http://{}/api/v1", addr);
    info!("Health:      http://{}/health", addr);
    info!("API Docs:    http://{}/swagger-ui", addr);
    info!("Neo4j:       {}", config.database.uri);
    info!("{}", separator);
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
