//! Lookup repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::LookupEntry;

/// Read access to the campaign, voice, and response category tables.
///
/// Not-found is reported through the `Ok` value; `Err` always means the
/// store itself could not answer.
#[async_trait]
pub trait LookupRepository: Send + Sync {
    /// Whether a campaign with this id exists and is enabled.
    async fn find_campaign(&self, id: i64) -> DomainResult<bool>;

    /// Voice id for an exact, case-sensitive name.
    async fn find_voice_id_by_name(&self, name: &str) -> DomainResult<Option<i64>>;

    /// Response category id for an exact, case-sensitive name.
    async fn find_category_id_by_name(&self, name: &str) -> DomainResult<Option<i64>>;

    /// Every row of the voices table.
    async fn list_all_voices(&self) -> DomainResult<Vec<LookupEntry>>;

    /// Every row of the response categories table.
    async fn list_all_categories(&self) -> DomainResult<Vec<LookupEntry>>;

    /// Ids of campaigns currently flagged enabled.
    async fn list_enabled_campaign_ids(&self) -> DomainResult<Vec<i64>>;
}
