//! Startup warm-up of the lookup cache.

use tracing::{error, info};

use super::lookup_cache::LookupCache;
use crate::domain::ports::LookupRepository;

/// Rows loaded per mapping; `None` when that bulk query failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub categories: Option<usize>,
    pub voices: Option<usize>,
    pub campaigns: Option<usize>,
}

impl PreloadReport {
    pub const fn is_complete(&self) -> bool {
        self.categories.is_some() && self.voices.is_some() && self.campaigns.is_some()
    }
}

/// Load all response categories, all voices, and every enabled campaign.
///
/// Runs once before the listener binds. A failed bulk query is logged and
/// leaves its mapping to fill on demand; the other queries still run.
pub async fn preload<R: LookupRepository>(cache: &LookupCache<R>) -> PreloadReport {
    info!("preloading lookup caches");
    let store = cache.store();

    let categories = match store.list_all_categories().await {
        Ok(rows) => {
            let count = rows.len();
            for row in rows {
                cache.populate_category(row.name, row.id).await;
            }
            info!(count, "preloaded response categories");
            Some(count)
        }
        Err(e) => {
            error!(error = %e, "failed to preload response categories");
            None
        }
    };

    let voices = match store.list_all_voices().await {
        Ok(rows) => {
            let count = rows.len();
            for row in rows {
                cache.populate_voice(row.name, row.id).await;
            }
            info!(count, "preloaded voices");
            Some(count)
        }
        Err(e) => {
            error!(error = %e, "failed to preload voices");
            None
        }
    };

    let campaigns = match store.list_enabled_campaign_ids().await {
        Ok(ids) => {
            let count = ids.len();
            for id in ids {
                cache.populate_campaign(id, true).await;
            }
            info!(count, "preloaded enabled campaigns");
            Some(count)
        }
        Err(e) => {
            error!(error = %e, "failed to preload campaigns");
            None
        }
    };

    PreloadReport {
        categories,
        voices,
        campaigns,
    }
}
