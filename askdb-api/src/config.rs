use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the gateway credential
pub const API_KEY_VAR: &str = "CALYPSO_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not found. Ensure {0} is set as an environment variable.")]
    MissingCredential(String),
    #[error("{0} has extra spaces. Remove any spaces or tabs from the key.")]
    MalformedCredential(String),
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub provider: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: PathBuf::from("database.db"),
                read_only: false,
            },
            gateway: GatewayConfig {
                base_url: askdb_llm_sdk::calypso::client::DEFAULT_BASE_URL.to_string(),
                provider: askdb_llm_sdk::providers::DEFAULT_PROVIDER.to_string(),
                timeout_secs: 300,
            },
        }
    }
}

impl AppConfig {
    /// Layer built-in defaults, config files and `ASKDB__*` environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `askdb.toml` in the working
    /// directory and in the user config directory are read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();

        let mut builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().to_string(),
            )?
            .set_default("database.read_only", defaults.database.read_only)?
            .set_default("gateway.base_url", defaults.gateway.base_url)?
            .set_default("gateway.provider", defaults.gateway.provider)?
            .set_default("gateway.timeout_secs", defaults.gateway.timeout_secs as i64)?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                for candidate in default_config_paths() {
                    builder = builder.add_source(File::from(candidate).required(false));
                }
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix("ASKDB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;

        // Expand tilde in database path
        if config.database.path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                let path_str = config.database.path.to_string_lossy();
                let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
                config.database.path = PathBuf::from(expanded);
            }
        }

        Ok(config)
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("askdb/askdb.toml"));
    }
    paths.push(PathBuf::from("askdb.toml"));
    paths
}

/// Read the gateway credential from the environment.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    validate_api_key(std::env::var(API_KEY_VAR).ok(), API_KEY_VAR)
}

/// Reject a missing/empty key, or one carrying leading or trailing whitespace.
pub fn validate_api_key(value: Option<String>, key_name: &str) -> Result<String, ConfigError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Err(ConfigError::MissingCredential(key_name.to_string())),
    };

    if value.trim() != value {
        return Err(ConfigError::MalformedCredential(key_name.to_string()));
    }

    Ok(value)
}

/// Keep the first characters of a key for logs, hide the rest
pub fn mask_api_key(key: &str) -> String {
    let visible: String = key.chars().take(6).collect();
    let hidden = key.chars().count().saturating_sub(6).min(34);
    format!("{}{}", visible, "*".repeat(hidden))
}
