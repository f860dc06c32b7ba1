use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub fallback: FallbackConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// SQLite URL of the persistent store. An empty string means no store is
    /// configured and the gateway serves the fallback dataset only.
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/maintarr.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// "*" allows any origin. Deliberately permissive by default to match
    /// the browser clients this gateway serves; tighten for production.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens.
    pub token_secret: String,

    /// Access token lifetime in seconds (default: 3600)
    pub token_ttl_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: "change-me".to_string(),
            token_ttl_seconds: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FallbackConfig {
    /// Explicit test-mode flag. When on, store failures on read endpoints
    /// degrade to the static dataset (marked via the X-Data-Source header)
    /// and the unsigned legacy token form is accepted. When off, a store
    /// failure is a 500 and only signed tokens are honored.
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = None;
        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                config = Some(Self::load_from_path(path)?);
                break;
            }
        }

        let mut config = config.unwrap_or_else(|| {
            info!("No config file found, using defaults");
            Self::default()
        });

        config.apply_env();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Hosting platforms inject the listen port via `PORT`.
    fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var("PORT") {
            self.apply_port_override(&raw);
        }
    }

    fn apply_port_override(&mut self, raw: &str) {
        match raw.parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(_) => tracing::warn!("Ignoring unparseable PORT value: {raw}"),
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("maintarr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".maintarr").join("config.toml"));
        }

        paths
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fallback.enabled && self.general.database_path.is_empty() {
            anyhow::bail!("A database path is required when fallback mode is disabled");
        }

        if self.auth.token_secret.is_empty() {
            anyhow::bail!("Auth token secret cannot be empty");
        }

        if self.auth.token_ttl_seconds == 0 {
            anyhow::bail!("Token TTL must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.token_ttl_seconds, 3600);
        assert!(!config.fallback.enabled);
        assert_eq!(config.server.cors_allowed_origins, vec!["*".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[auth]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 9000

            [fallback]
            enabled = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert!(config.fallback.enabled);

        assert_eq!(config.auth.token_ttl_seconds, 3600);
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_port_override("7070");
        assert_eq!(config.server.port, 7070);

        config.apply_port_override("not-a-port");
        assert_eq!(config.server.port, 7070);
    }

    #[test]
    fn test_validate_rejects_no_data_source() {
        let mut config = Config::default();
        config.general.database_path = String::new();
        assert!(config.validate().is_err());

        config.fallback.enabled = true;
        assert!(config.validate().is_ok());
    }
}
