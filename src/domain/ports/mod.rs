//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces the storage adapters implement:
//! - LookupRepository: point lookups and bulk listings for the lookup tables
//! - CallRepository: call inserts and store reachability

pub mod call_repository;
pub mod lookup_repository;

pub use call_repository::CallRepository;
pub use lookup_repository::LookupRepository;
