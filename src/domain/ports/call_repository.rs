//! Call repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewCall, SavedCall};

/// Repository interface for call persistence.
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Insert a call row, returning the id and timestamp assigned by the store.
    async fn insert_call(&self, call: &NewCall) -> DomainResult<SavedCall>;

    /// Check that the store is reachable.
    async fn ping(&self) -> DomainResult<()>;
}
