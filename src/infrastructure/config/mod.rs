//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Optional YAML file
//! - `CALLSINK_*` environment overrides
//! - The plain `DB_*` and `PORT` variables
//! - Validation of required database credentials

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
