//! Callsink - call event ingestion service
//!
//! Accepts call records over HTTP, resolves campaign, voice, and response
//! category references through an in-process read-through cache, and stores
//! the resulting row in PostgreSQL.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors, and the store ports
//! - **Service Layer** (`services`): call ingestion orchestration
//! - **Adapters** (`adapters`): lookup cache, PostgreSQL, in-memory store, HTTP
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use callsink::adapters::cache::{preload, LookupCache};
//! use callsink::adapters::memory::InMemoryStore;
//! use callsink::services::CallService;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let cache = Arc::new(LookupCache::new(Arc::clone(&store)));
//! preload(&cache).await;
//! let service = CallService::new(cache, store);
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::{preload, LookupCache, PreloadReport};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{CallSubmission, Config, LookupKind, NewCall, SavedCall};
pub use domain::ports::{CallRepository, LookupRepository};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::CallService;
