//! Read-through cache for campaign, voice, and response category lookups.
//!
//! Entries live for the life of the process. Campaign existence caches both
//! outcomes; voice and category tables only ever hold names the store
//! confirmed, so a miss is retried against the store on every request.
//!
//! Known limitation: a campaign cached as absent stays absent until restart,
//! even if it is created or enabled later.

use std::sync::Arc;
use tracing::debug;

use super::lookup_table::LookupTable;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::LookupKind;
use crate::domain::ports::LookupRepository;

/// Entry counts per mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub campaigns: usize,
    pub voices: usize,
    pub categories: usize,
}

/// Lookup cache over a [`LookupRepository`].
///
/// Two concurrent resolves of the same unseen key may both query the store
/// and both write; the write is idempotent so no per-key lock is taken.
pub struct LookupCache<R: LookupRepository> {
    store: Arc<R>,
    campaigns: LookupTable<i64, bool>,
    voices: LookupTable<String, i64>,
    categories: LookupTable<String, i64>,
}

impl<R: LookupRepository> LookupCache<R> {
    /// Create an empty cache. Call [`super::preload`] before serving traffic.
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            campaigns: LookupTable::new("campaigns"),
            voices: LookupTable::new("voices"),
            categories: LookupTable::new("response categories"),
        }
    }

    pub fn store(&self) -> &Arc<R> {
        &self.store
    }

    // Memory-only reads

    pub async fn lookup_campaign(&self, id: i64) -> Option<bool> {
        self.campaigns.get(&id).await
    }

    pub async fn lookup_voice(&self, name: &str) -> Option<i64> {
        self.voices.get(name).await
    }

    pub async fn lookup_category(&self, name: &str) -> Option<i64> {
        self.categories.get(name).await
    }

    // Read-through resolution

    /// Whether the campaign exists. A cached `false` is authoritative.
    pub async fn resolve_campaign(&self, id: i64) -> DomainResult<bool> {
        if id < 1 {
            return Ok(false);
        }
        if let Some(exists) = self.campaigns.get(&id).await {
            return Ok(exists);
        }

        let exists = self.store.find_campaign(id).await?;
        self.campaigns.insert(id, exists).await;
        debug!(campaign_id = id, exists, "cached campaign existence");
        Ok(exists)
    }

    pub async fn resolve_voice(&self, name: &str) -> DomainResult<i64> {
        if let Some(id) = self.voices.get(name).await {
            return Ok(id);
        }

        let found = self.store.find_voice_id_by_name(name).await?;
        Self::confirm(&self.voices, LookupKind::Voice, name, found).await
    }

    pub async fn resolve_category(&self, name: &str) -> DomainResult<i64> {
        if let Some(id) = self.categories.get(name).await {
            return Ok(id);
        }

        let found = self.store.find_category_id_by_name(name).await?;
        Self::confirm(&self.categories, LookupKind::ResponseCategory, name, found).await
    }

    /// Cache a confirmed name; report a miss without touching the table.
    async fn confirm(
        table: &LookupTable<String, i64>,
        kind: LookupKind,
        name: &str,
        found: Option<i64>,
    ) -> DomainResult<i64> {
        match found {
            Some(id) => {
                table.insert(name.to_string(), id).await;
                debug!(table = table.name(), name, id, "cached lookup");
                Ok(id)
            }
            None => {
                debug!(kind = %kind, name, "lookup miss");
                Err(DomainError::LookupMiss {
                    kind,
                    name: name.to_string(),
                })
            }
        }
    }

    // Preload inserts

    pub async fn populate_campaign(&self, id: i64, exists: bool) {
        self.campaigns.insert(id, exists).await;
    }

    pub async fn populate_voice(&self, name: impl Into<String>, id: i64) {
        self.voices.insert(name.into(), id).await;
    }

    pub async fn populate_category(&self, name: impl Into<String>, id: i64) {
        self.categories.insert(name.into(), id).await;
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            campaigns: self.campaigns.len().await,
            voices: self.voices.len().await,
            categories: self.categories.len().await,
        }
    }
}
