//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `MEDAPPT_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data_service: DataServiceConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which [`TableStore`](crate::datastore::TableStore) to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataBackend {
    /// Hosted PostgREST-compatible service
    #[default]
    Rest,
    /// In-process tables, lost on exit
    Memory,
}

impl std::str::FromStr for DataBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rest" => Ok(DataBackend::Rest),
            "memory" => Ok(DataBackend::Memory),
            other => Err(ConfigError::Invalid(format!(
                "unknown data backend '{}' (expected rest or memory)",
                other
            ))),
        }
    }
}

/// Hosted data service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataServiceConfig {
    #[serde(default)]
    pub backend: DataBackend,

    /// Project URL, e.g. `https://<project>.supabase.co`
    #[serde(default = "default_data_url")]
    pub url: String,

    /// Public (anon) API key sent as `apikey` and bearer token
    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Preload the memory backend with a demo clinic
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
}

fn default_data_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_seed_demo() -> bool {
    true
}

impl Default for DataServiceConfig {
    fn default() -> Self {
        Self {
            backend: DataBackend::default(),
            url: default_data_url(),
            anon_key: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
            seed_demo: default_seed_demo(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins; empty allows any
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8081".to_string(),
        "http://127.0.0.1:8081".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Bind address
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("api address: {}", e)))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> String {
        format!("medappt={},tower_http=info", self.level)
    }

    /// Install the global subscriber. `RUST_LOG` wins over the configured level.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| self.directive().into());
        let registry = tracing_subscriber::registry().with(filter);

        if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("medappt").join("config.toml")),
            Some(PathBuf::from("/etc/medappt/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `MEDAPPT_*` overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("MEDAPPT_DATA_BACKEND") {
            match backend.parse() {
                Ok(b) => self.data_service.backend = b,
                Err(e) => tracing::warn!("Ignoring MEDAPPT_DATA_BACKEND: {}", e),
            }
        }
        if let Some(url) = lookup("MEDAPPT_DATA_URL") {
            self.data_service.url = url;
        }
        if let Some(key) = lookup("MEDAPPT_DATA_KEY") {
            self.data_service.anon_key = key;
        }

        if let Some(host) = lookup("MEDAPPT_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("MEDAPPT_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(level) = lookup("MEDAPPT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("MEDAPPT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_service.backend == DataBackend::Rest {
            if self.data_service.url.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "data_service.url is required for the rest backend".to_string(),
                ));
            }
            if self.data_service.anon_key.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "data_service.anon_key is required for the rest backend (or set MEDAPPT_DATA_KEY)"
                        .to_string(),
                ));
            }
        }
        self.api.addr()?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# MedAppt Configuration
#
# Environment variables override these settings:
# - MEDAPPT_DATA_BACKEND
# - MEDAPPT_DATA_URL
# - MEDAPPT_DATA_KEY
# - MEDAPPT_API_HOST
# - MEDAPPT_API_PORT
# - MEDAPPT_LOG_LEVEL
# - MEDAPPT_LOG_FORMAT

[data_service]
# Backend: rest (hosted table service) or memory (offline, lost on exit)
backend = "rest"

# Project URL of the hosted table service
url = "http://localhost:54321"

# Public anon key
anon_key = ""

# Per-request timeout (ms)
request_timeout_ms = 10000

# Preload the memory backend with demo doctors, patients and appointments
seed_demo = true

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8080

# Allowed CORS origins (empty list allows any)
cors_origins = ["http://localhost:8081", "http://127.0.0.1:8081"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_service.backend, DataBackend::Rest);
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.data_service.seed_demo);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.data_service.request_timeout_ms, 10_000);
        assert_eq!(config.api.cors_origins.len(), 2);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[data_service]\nbackend = \"memory\"\n\n[api]\nport = 9000\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data_service.backend, DataBackend::Memory);
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/medappt.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("MEDAPPT_DATA_BACKEND", "memory"),
            ("MEDAPPT_DATA_KEY", "secret"),
            ("MEDAPPT_API_PORT", "not-a-port"),
            ("MEDAPPT_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_service.backend, DataBackend::Memory);
        assert_eq!(config.data_service.anon_key, "secret");
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_validate_rest_requires_key() {
        let mut config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.data_service.anon_key = "anon".to_string();
        assert!(config.validate().is_ok());

        config.data_service.backend = DataBackend::Memory;
        config.data_service.anon_key.clear();
        assert!(config.validate().is_ok());

        config.api.host = "not a host".to_string();
        assert!(config.validate().is_err());
    }
}
