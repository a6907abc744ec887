//! Infrastructure adapters for external systems.

pub mod cache;
pub mod http;
pub mod memory;
pub mod postgres;
