//! Application configuration structures.

use serde::{Deserialize, Serialize};

/// Password used when none is configured; flagged at load time in production.
pub const DEFAULT_DATABASE_PASSWORD: &str = "neo4j";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Graph database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "usergraph".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Neo4j connection settings.
///
/// The connection is opened once at startup and shared by every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Bolt URI, e.g. `bolt://localhost:7687` or `neo4j+s://host`.
    pub uri: String,
    /// Username.
    pub user: String,
    /// Password.
    pub password: String,
    /// Target database; the server default when unset.
    pub name: Option<String>,
    /// Maximum connections held by the driver pool.
    pub max_connections: usize,
    /// Records pulled per round trip.
    pub fetch_size: usize,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: DEFAULT_DATABASE_PASSWORD.to_string(),
            name: None,
            max_connections: 16,
            fetch_size: 200,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence.
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Whether logs should be emitted as JSON lines.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Default filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_filter(&self) -> String {
        format!("{},usergraph=debug,tower_http=debug", self.log_level)
    }
}
