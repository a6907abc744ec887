//! In-process store implementing both repository ports.
//!
//! Holds the four tables in memory, counts every port call per operation,
//! and can be told to fail individual operations. Tests use it to observe
//! exactly how often the lookup cache falls through to the store.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{LookupEntry, NewCall, SavedCall};
use crate::domain::ports::{CallRepository, LookupRepository};

/// Port operations tracked by [`InMemoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FindCampaign,
    FindVoice,
    FindCategory,
    ListVoices,
    ListCategories,
    ListEnabledCampaigns,
    InsertCall,
    Ping,
}

impl StoreOperation {
    const COUNT: usize = 8;

    const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FindCampaign => "find_campaign",
            Self::FindVoice => "find_voice_id_by_name",
            Self::FindCategory => "find_category_id_by_name",
            Self::ListVoices => "list_all_voices",
            Self::ListCategories => "list_all_categories",
            Self::ListEnabledCampaigns => "list_enabled_campaign_ids",
            Self::InsertCall => "insert_call",
            Self::Ping => "ping",
        }
    }
}

/// A call row as stored by [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct StoredCall {
    pub id: i64,
    pub call: NewCall,
}

#[derive(Default)]
pub struct InMemoryStore {
    /// campaign id -> enabled flag
    campaigns: RwLock<HashMap<i64, bool>>,
    voices: RwLock<HashMap<String, i64>>,
    categories: RwLock<HashMap<String, i64>>,
    calls: RwLock<Vec<StoredCall>>,
    next_call_id: AtomicI64,
    failing: RwLock<HashSet<StoreOperation>>,
    counters: [AtomicUsize; StoreOperation::COUNT],
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_campaign(&self, id: i64, enabled: bool) {
        self.campaigns.write().await.insert(id, enabled);
    }

    pub async fn add_voice(&self, id: i64, name: impl Into<String>) {
        self.voices.write().await.insert(name.into(), id);
    }

    pub async fn add_category(&self, id: i64, name: impl Into<String>) {
        self.categories.write().await.insert(name.into(), id);
    }

    /// Make `op` return `StoreUnavailable` until [`Self::recover`] is called.
    pub async fn fail(&self, op: StoreOperation) {
        self.failing.write().await.insert(op);
    }

    pub async fn recover(&self, op: StoreOperation) {
        self.failing.write().await.remove(&op);
    }

    /// Number of times `op` has been invoked, failed calls included.
    pub fn calls(&self, op: StoreOperation) -> usize {
        self.counters[op.index()].load(Ordering::SeqCst)
    }

    pub async fn stored_calls(&self) -> Vec<StoredCall> {
        self.calls.read().await.clone()
    }

    async fn enter(&self, op: StoreOperation) -> DomainResult<()> {
        self.counters[op.index()].fetch_add(1, Ordering::SeqCst);
        if self.failing.read().await.contains(&op) {
            return Err(DomainError::StoreUnavailable(format!(
                "{} failed: store offline",
                op.as_str()
            )));
        }
        Ok(())
    }
}

fn sorted_entries(table: &HashMap<String, i64>) -> Vec<LookupEntry> {
    let mut entries: Vec<LookupEntry> = table
        .iter()
        .map(|(name, id)| LookupEntry::new(*id, name.clone()))
        .collect();
    entries.sort_by_key(|e| e.id);
    entries
}

#[async_trait]
impl LookupRepository for InMemoryStore {
    async fn find_campaign(&self, id: i64) -> DomainResult<bool> {
        self.enter(StoreOperation::FindCampaign).await?;
        Ok(self.campaigns.read().await.get(&id).copied().unwrap_or(false))
    }

    async fn find_voice_id_by_name(&self, name: &str) -> DomainResult<Option<i64>> {
        self.enter(StoreOperation::FindVoice).await?;
        Ok(self.voices.read().await.get(name).copied())
    }

    async fn find_category_id_by_name(&self, name: &str) -> DomainResult<Option<i64>> {
        self.enter(StoreOperation::FindCategory).await?;
        Ok(self.categories.read().await.get(name).copied())
    }

    async fn list_all_voices(&self) -> DomainResult<Vec<LookupEntry>> {
        self.enter(StoreOperation::ListVoices).await?;
        Ok(sorted_entries(&*self.voices.read().await))
    }

    async fn list_all_categories(&self) -> DomainResult<Vec<LookupEntry>> {
        self.enter(StoreOperation::ListCategories).await?;
        Ok(sorted_entries(&*self.categories.read().await))
    }

    async fn list_enabled_campaign_ids(&self) -> DomainResult<Vec<i64>> {
        self.enter(StoreOperation::ListEnabledCampaigns).await?;
        let mut ids: Vec<i64> = self
            .campaigns
            .read()
            .await
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

#[async_trait]
impl CallRepository for InMemoryStore {
    async fn insert_call(&self, call: &NewCall) -> DomainResult<SavedCall> {
        self.enter(StoreOperation::InsertCall).await?;

        let id = self.next_call_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.calls.write().await.push(StoredCall {
            id,
            call: call.clone(),
        });

        Ok(SavedCall {
            id,
            timestamp: Utc::now(),
        })
    }

    async fn ping(&self) -> DomainResult<()> {
        self.enter(StoreOperation::Ping).await
    }
}
