use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::{Config, DatabaseConfig};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required database setting: {0}")]
    MissingDatabaseSetting(&'static str),

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid min_connections: {min} exceeds max_connections {max}")]
    InvalidMinConnections { min: u32, max: u32 },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Server host cannot be empty")]
    EmptyServerHost,
}

/// Plain numeric variables read on top of the `CALLSINK_` namespace.
const PLAIN_ENV_KEYS: [(&str, &str); 2] = [("DB_PORT", "database.port"), ("PORT", "server.port")];

/// Credential variables, taken verbatim: (config path, namespaced, plain).
const CREDENTIAL_VARS: [(&str, &str, &str); 4] = [
    ("database.host", "CALLSINK_DATABASE__HOST", "DB_HOST"),
    ("database.user", "CALLSINK_DATABASE__USER", "DB_USER"),
    ("database.password", "CALLSINK_DATABASE__PASSWORD", "DB_PASSWORD"),
    ("database.name", "CALLSINK_DATABASE__NAME", "DB_NAME"),
];

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML file, when a path is given
    /// 3. Environment variables (CALLSINK_* prefix, `__` separates sections)
    /// 4. DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, PORT
    ///
    /// Credential variables bypass figment's value parsing so that a
    /// password like `007` or `[abc]` reaches the driver unchanged.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed("CALLSINK_").split("__"))
            .merge(plain_env())
            .merge(raw_credentials())
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Read a `.env` file into the process environment.
    ///
    /// Variables that are already set are not overridden. Without a path the
    /// current directory and its parents are searched, and a missing file is
    /// not an error. Returns the file that was read.
    pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
        let loaded = match path {
            Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
            None => dotenvy::dotenv(),
        };

        match loaded {
            Ok(file) => Ok(Some(file)),
            Err(dotenvy::Error::Io(e)) if path.is_none() && e.kind() == io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to read .env file"),
        }
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        Self::validate_database(&config.database)?;

        if config.server.host.is_empty() {
            return Err(ConfigError::EmptyServerHost);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }

    fn validate_database(db: &DatabaseConfig) -> Result<(), ConfigError> {
        require(db.host.as_deref(), "DB_HOST")?;
        if db.port.is_none() {
            return Err(ConfigError::MissingDatabaseSetting("DB_PORT"));
        }
        require(db.user.as_deref(), "DB_USER")?;
        require(db.password.as_deref(), "DB_PASSWORD")?;
        require(db.name.as_deref(), "DB_NAME")?;

        if db.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(db.max_connections));
        }
        if db.min_connections > db.max_connections {
            return Err(ConfigError::InvalidMinConnections {
                min: db.min_connections,
                max: db.max_connections,
            });
        }

        Ok(())
    }
}

fn require(value: Option<&str>, name: &'static str) -> Result<(), ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ConfigError::MissingDatabaseSetting(name)),
    }
}

fn plain_env() -> Env {
    Env::raw().filter_map(|key| {
        PLAIN_ENV_KEYS
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| (*path).into())
    })
}

fn raw_credentials() -> Figment {
    let mut figment = Figment::new();
    for (path, namespaced, plain) in CREDENTIAL_VARS {
        for var in [namespaced, plain] {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(path, value));
            }
        }
    }
    figment
}

impl DatabaseConfig {
    /// Connection options for a validated configuration.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        ConfigLoader::validate_database(self)?;

        let mut options = PgConnectOptions::new().ssl_mode(PgSslMode::Disable);
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(name) = &self.name {
            options = options.database(name);
        }
        Ok(options)
    }
}
