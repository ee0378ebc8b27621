//! PostgreSQL implementation of BillingEventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use radar_core::traits::{BillingEventRepository, RepoResult};

use super::error::map_db_error;

/// Processed Stripe webhook events, keyed by event id
#[derive(Clone)]
pub struct PgBillingEventRepository {
    pool: PgPool,
}

impl PgBillingEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BillingEventRepository for PgBillingEventRepository {
    #[instrument(skip(self))]
    async fn is_processed(&self, event_id: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM billing_events WHERE event_id = $1)",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn record(&self, event_id: &str, kind: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO billing_events (event_id, kind)
            VALUES ($1, $2)
            ON CONFLICT (event_id) DO NOTHING
            ",
        )
        .bind(event_id)
        .bind(kind)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
