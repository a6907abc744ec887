pub mod call;
pub mod config;
pub mod lookup;

pub use call::{CallSubmission, NewCall, SavedCall};
pub use config::{Config, DatabaseConfig, LogFormat, LoggingConfig, RotationPolicy, ServerConfig};
pub use lookup::{LookupEntry, LookupKind};
