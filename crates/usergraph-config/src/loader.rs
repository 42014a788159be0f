//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_DATABASE_PASSWORD};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use usergraph_core::UserGraphError;

/// Environment variable prefix for overrides (`USERGRAPH_DATABASE__URI`, ...).
pub const ENV_PREFIX: &str = "USERGRAPH";

/// Directory the server reads its TOML layers from.
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Environment source: one `_` after the prefix, `__` between nested keys.
fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Environment variables with `USERGRAPH_` prefix
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a source cannot be parsed or the
    /// result fails validation.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, UserGraphError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// # Errors
    ///
    /// Leaves the current configuration untouched and returns the error when
    /// the new sources fail to load.
    pub async fn reload(&self) -> Result<(), UserGraphError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, UserGraphError> {
        Self::load_config_with(config_dir, env_source())
    }

    fn load_config_with(
        config_dir: &str,
        env: Environment,
    ) -> Result<AppConfig, UserGraphError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("USERGRAPH_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(env);

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_usergraph_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    fn validate_config(config: &AppConfig) -> Result<(), UserGraphError> {
        if config.database.uri.trim().is_empty() {
            return Err(UserGraphError::Configuration(
                "Database URI is required".to_string(),
            ));
        }

        if config.database.user.trim().is_empty() {
            return Err(UserGraphError::Configuration(
                "Database user is required".to_string(),
            ));
        }

        if config.database.max_connections == 0 {
            return Err(UserGraphError::Configuration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if config.app.environment == "production"
            && config.database.password == DEFAULT_DATABASE_PASSWORD
        {
            warn!("Using the default Neo4j password in production");
        }

        Ok(())
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_usergraph_error(err: ConfigError) -> UserGraphError {
    UserGraphError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerConfig;
    use std::collections::HashMap;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.uri, "bolt://localhost:7687");
        assert_eq!(config.database.user, "neo4j");
        assert!(config.database.name.is_none());
        assert!(!config.observability.is_json());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_validate_rejects_empty_uri() {
        let mut config = AppConfig::default();
        config.database.uri = "  ".to_string();
        let err = ConfigLoader::validate_config(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_validate_rejects_zero_pool() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(ConfigLoader::validate_config(&AppConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_loads_default_toml_and_reads_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
port = 9191

[database]
uri = "bolt://graph.internal:7687"
name = "people"
"#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.database.uri, "bolt://graph.internal:7687");
        assert_eq!(config.database.name.as_deref(), Some("people"));
        // untouched keys keep their defaults
        assert_eq!(config.database.fetch_size, 200);

        let port: Option<u16> = loader.get_value("server.port").await;
        assert_eq!(port, Some(9191));
        let missing: Option<String> = loader.get_value("server.nope").await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[observability]\nlog_format = \"pretty\"\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        assert!(!loader.get().await.observability.is_json());

        fs::write(&path, "[observability]\nlog_format = \"json\"\n").unwrap();
        loader.reload().await.unwrap();
        assert!(loader.get().await.observability.is_json());
    }

    #[test]
    fn test_env_override_uses_single_underscore_after_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[database]\nuri = \"bolt://from-file:7687\"\n",
        )
        .unwrap();

        let vars = HashMap::from([
            (
                "USERGRAPH_DATABASE__URI".to_string(),
                "bolt://from-env:7687".to_string(),
            ),
            ("USERGRAPH_SERVER__PORT".to_string(), "9292".to_string()),
        ]);
        let config = ConfigLoader::load_config_with(
            &dir.path().to_string_lossy(),
            env_source().source(Some(vars)),
        )
        .unwrap();

        assert_eq!(config.database.uri, "bolt://from-env:7687");
        assert_eq!(config.server.port, 9292);
    }
}
