//! Domain layer for the call ingestion service
//!
//! This module contains the core models, the error taxonomy, and the
//! store-facing port traits.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
