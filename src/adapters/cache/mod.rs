//! In-memory caching layer for lookup-table reads.
//!
//! Three grow-only mappings, each behind its own `tokio::sync::RwLock`,
//! filled at startup by [`preload`] and extended on demand by the
//! read-through `resolve_*` operations of [`LookupCache`].

pub mod lookup_cache;
pub mod lookup_table;
pub mod preloader;

pub use lookup_cache::{CacheStats, LookupCache};
pub use lookup_table::LookupTable;
pub use preloader::{preload, PreloadReport};
