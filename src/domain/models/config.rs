use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Callsink
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
///
/// Credentials have no defaults; a missing value is a startup error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    #[serde(default)]
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,

    /// Maximum number of open connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Floor of connections the pool keeps open at all times, idle or not.
    /// This is not a cap on idle connections.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum lifetime of a pooled connection
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,

    /// How long a request waits for a free connection
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

const fn default_max_connections() -> u32 {
    50
}

const fn default_min_connections() -> u32 {
    25
}

const fn default_max_lifetime_secs() -> u64 {
    300
}

const fn default_acquire_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            user: None,
            password: None,
            name: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            max_lifetime_secs: default_max_lifetime_secs(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_server_port() -> u16 {
    8080
}

const fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            enable_cors: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Stdout format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for JSON log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            enable_stdout: true,
            rotation: RotationPolicy::default(),
        }
    }
}
