//! PostgreSQL implementation of the CallRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewCall, SavedCall};
use crate::domain::ports::CallRepository;

#[derive(Clone)]
pub struct PgCallRepository {
    pool: PgPool,
}

impl PgCallRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CallRepository for PgCallRepository {
    async fn insert_call(&self, call: &NewCall) -> DomainResult<SavedCall> {
        let row: SavedCallRow = sqlx::query_as(
            r#"INSERT INTO calls (
                   client_campaign_model_id, number, transcription, stage,
                   voice_id, response_category_id, list_id, transferred, dispo_punched, timestamp
               ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING id::bigint AS id, "timestamp"::timestamptz AS "timestamp""#,
        )
        .bind(call.campaign_id)
        .bind(&call.number)
        .bind(&call.transcription)
        .bind(call.stage)
        .bind(call.voice_id)
        .bind(call.response_category_id)
        .bind(&call.list_id)
        .bind(call.transferred)
        .bind(call.dispo_punched)
        .bind(call.submitted_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(SavedCall {
            id: row.id,
            timestamp: row.timestamp,
        })
    }

    async fn ping(&self) -> DomainResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct SavedCallRow {
    id: i64,
    timestamp: DateTime<Utc>,
}
