//! PostgreSQL adapters for the call ingestion service.
//!
//! Table layout is owned elsewhere; these adapters expect
//! `client_campaign_model`, `voices`, `response_categories`, and `calls`.

pub mod call_repository;
pub mod connection;
pub mod lookup_repository;

pub use call_repository::PgCallRepository;
pub use connection::{create_pool, verify_connection, ConnectionError, PoolConfig};
pub use lookup_repository::PgLookupRepository;
