//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use radar_core::traits::{RepoResult, ReviewRepository};
use radar_core::{AccountId, NewReview, Review, ReviewId, ReviewQuery};

use crate::mappers::ReviewInsert;
use crate::models::ReviewModel;

use super::error::{convert_rows, map_db_error};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, account_id: AccountId, id: ReviewId) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, account_id, platform, external_id, author_name, rating, text, reply,
                   replied_at, reply_pending_upstream, review_date, fetched_at, notified
            FROM reviews
            WHERE id = $1 AND account_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(account_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, account_id: AccountId, query: &ReviewQuery) -> RepoResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, account_id, platform, external_id, author_name, rating, text, reply,
                   replied_at, reply_pending_upstream, review_date, fetched_at, notified
            FROM reviews
            WHERE account_id = $1
              AND ($2::TEXT IS NULL OR platform = $2)
              AND ($3::DOUBLE PRECISION IS NULL OR rating = $3)
            ORDER BY review_date DESC NULLS LAST, id DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(account_id.into_inner())
        .bind(query.platform.map(|p| p.as_str()))
        .bind(query.rating.map(f64::from))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_rows(rows)
    }

    #[instrument(skip(self))]
    async fn list_all(&self, account_id: AccountId) -> RepoResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, account_id, platform, external_id, author_name, rating, text, reply,
                   replied_at, reply_pending_upstream, review_date, fetched_at, notified
            FROM reviews
            WHERE account_id = $1
            ",
        )
        .bind(account_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_rows(rows)
    }

    #[instrument(skip(self, reviews), fields(count = reviews.len()))]
    async fn insert_new(
        &self,
        account_id: AccountId,
        reviews: &[NewReview],
    ) -> RepoResult<Vec<Review>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut inserted = Vec::new();

        for review in reviews {
            let row = ReviewInsert::new(account_id, review);

            let model = sqlx::query_as::<_, ReviewModel>(
                r"
                INSERT INTO reviews (account_id, platform, external_id, author_name, rating, text,
                                     reply, review_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (account_id, external_id) WHERE external_id IS NOT NULL DO NOTHING
                RETURNING id, account_id, platform, external_id, author_name, rating, text, reply,
                          replied_at, reply_pending_upstream, review_date, fetched_at, notified
                ",
            )
            .bind(row.account_id)
            .bind(row.platform)
            .bind(row.external_id)
            .bind(row.author_name)
            .bind(row.rating)
            .bind(row.text)
            .bind(row.reply)
            .bind(row.review_date)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if let Some(model) = model {
                inserted.push(Review::try_from(model)?);
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        debug!(
            inserted = inserted.len(),
            skipped = reviews.len() - inserted.len(),
            "Review batch stored"
        );
        Ok(inserted)
    }

    #[instrument(skip(self, reply))]
    async fn save_reply(
        &self,
        account_id: AccountId,
        id: ReviewId,
        reply: &str,
        replied_at: DateTime<Utc>,
        pending_upstream: bool,
    ) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            UPDATE reviews
            SET reply = $3, replied_at = $4, reply_pending_upstream = $5
            WHERE id = $1 AND account_id = $2
            RETURNING id, account_id, platform, external_id, author_name, rating, text, reply,
                      replied_at, reply_pending_upstream, review_date, fetched_at, notified
            ",
        )
        .bind(id.into_inner())
        .bind(account_id.into_inner())
        .bind(reply)
        .bind(replied_at)
        .bind(pending_upstream)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn mark_reply_delivered(&self, account_id: AccountId, id: ReviewId) -> RepoResult<()> {
        sqlx::query(
            "UPDATE reviews SET reply_pending_upstream = FALSE WHERE id = $1 AND account_id = $2",
        )
        .bind(id.into_inner())
        .bind(account_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_top_rated(
        &self,
        account_id: AccountId,
        min_rating: f64,
        limit: i64,
    ) -> RepoResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, account_id, platform, external_id, author_name, rating, text, reply,
                   replied_at, reply_pending_upstream, review_date, fetched_at, notified
            FROM reviews
            WHERE account_id = $1 AND rating >= $2
            ORDER BY review_date DESC NULLS LAST, id DESC
            LIMIT $3
            ",
        )
        .bind(account_id.into_inner())
        .bind(min_rating)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_rows(rows)
    }

    #[instrument(skip(self))]
    async fn list_unnotified_since(
        &self,
        account_id: AccountId,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, account_id, platform, external_id, author_name, rating, text, reply,
                   replied_at, reply_pending_upstream, review_date, fetched_at, notified
            FROM reviews
            WHERE account_id = $1 AND NOT notified AND fetched_at >= $2
            ORDER BY fetched_at, id
            ",
        )
        .bind(account_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_rows(rows)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn mark_notified(&self, account_id: AccountId, ids: &[ReviewId]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let raw: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        sqlx::query("UPDATE reviews SET notified = TRUE WHERE account_id = $1 AND id = ANY($2)")
            .bind(account_id.into_inner())
            .bind(&raw)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
