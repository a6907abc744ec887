//! Call ingestion service.
//!
//! Validates a submission, resolves its foreign keys through the lookup
//! cache, and inserts the resulting row.

use std::sync::Arc;
use tracing::debug;

use crate::adapters::cache::LookupCache;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CallSubmission, NewCall, SavedCall};
use crate::domain::ports::{CallRepository, LookupRepository};

pub struct CallService<L: LookupRepository, C: CallRepository> {
    lookups: Arc<LookupCache<L>>,
    calls: Arc<C>,
}

impl<L: LookupRepository, C: CallRepository> Clone for CallService<L, C> {
    fn clone(&self) -> Self {
        Self {
            lookups: Arc::clone(&self.lookups),
            calls: Arc::clone(&self.calls),
        }
    }
}

impl<L: LookupRepository, C: CallRepository> CallService<L, C> {
    pub fn new(lookups: Arc<LookupCache<L>>, calls: Arc<C>) -> Self {
        Self { lookups, calls }
    }

    pub fn lookups(&self) -> &Arc<LookupCache<L>> {
        &self.lookups
    }

    /// Validate, resolve, and persist a call.
    ///
    /// Resolution runs campaign, then voice, then category; the first
    /// failure stops the submission before anything is inserted.
    pub async fn create_call(&self, submission: CallSubmission) -> DomainResult<SavedCall> {
        if submission.number.is_empty() {
            return Err(DomainError::InvalidInput("Number is required".to_string()));
        }

        let campaign_id = submission.client_campaign_model_id;
        if !self.lookups.resolve_campaign(campaign_id).await? {
            return Err(DomainError::UnknownCampaign(campaign_id));
        }

        let voice_id = match submission.requested_voice() {
            Some(name) => Some(self.lookups.resolve_voice(name).await?),
            None => None,
        };

        let response_category_id = match submission.requested_category() {
            Some(name) => Some(self.lookups.resolve_category(name).await?),
            None => None,
        };

        let call = NewCall::from_submission(submission, voice_id, response_category_id);
        let saved = self
            .calls
            .insert_call(&call)
            .await
            .map_err(|e| DomainError::PersistFailed(e.to_string()))?;

        debug!(call_id = saved.id, campaign_id, "call saved");
        Ok(saved)
    }

    /// Whether the call store answers a ping.
    pub async fn health(&self) -> bool {
        self.calls.ping().await.is_ok()
    }
}
