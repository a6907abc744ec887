//! PostgreSQL implementation of the LookupRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::DomainResult;
use crate::domain::models::LookupEntry;
use crate::domain::ports::LookupRepository;

#[derive(Clone)]
pub struct PgLookupRepository {
    pool: PgPool,
}

impl PgLookupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LookupRepository for PgLookupRepository {
    async fn find_campaign(&self, id: i64) -> DomainResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM client_campaign_model WHERE id = $1 AND is_enabled = true)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_voice_id_by_name(&self, name: &str) -> DomainResult<Option<i64>> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id::bigint FROM voices WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find_category_id_by_name(&self, name: &str) -> DomainResult<Option<i64>> {
        let id: Option<i64> =
            sqlx::query_scalar("SELECT id::bigint FROM response_categories WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(id)
    }

    async fn list_all_voices(&self) -> DomainResult<Vec<LookupEntry>> {
        let rows: Vec<LookupRow> = sqlx::query_as("SELECT id::bigint AS id, name FROM voices")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(LookupEntry::from).collect())
    }

    async fn list_all_categories(&self) -> DomainResult<Vec<LookupEntry>> {
        let rows: Vec<LookupRow> =
            sqlx::query_as("SELECT id::bigint AS id, name FROM response_categories")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(LookupEntry::from).collect())
    }

    async fn list_enabled_campaign_ids(&self) -> DomainResult<Vec<i64>> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT id::bigint FROM client_campaign_model WHERE is_enabled = true")
                .fetch_all(&self.pool)
                .await?;

        Ok(ids)
    }
}

#[derive(sqlx::FromRow)]
struct LookupRow {
    id: i64,
    name: String,
}

impl From<LookupRow> for LookupEntry {
    fn from(row: LookupRow) -> Self {
        LookupEntry {
            id: row.id,
            name: row.name,
        }
    }
}
