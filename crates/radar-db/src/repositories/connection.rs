//! PostgreSQL implementation of ConnectionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use radar_core::traits::{ConnectionRepository, RepoResult};
use radar_core::{AccountId, ConnectionId, DomainError, NewConnection, Platform, PlatformConnection};

use crate::models::ConnectionModel;

use super::error::{convert_rows, map_db_error};

/// PostgreSQL implementation of ConnectionRepository
#[derive(Clone)]
pub struct PgConnectionRepository {
    pool: PgPool,
}

impl PgConnectionRepository {
    /// Create a new PgConnectionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for PgConnectionRepository {
    #[instrument(skip(self))]
    async fn find_by_platform(
        &self,
        account_id: AccountId,
        platform: Platform,
    ) -> RepoResult<Option<PlatformConnection>> {
        let result = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, account_id, platform, access_token, refresh_token, account_ref,
                   location_ref, account_name, connected_at
            FROM platform_connections
            WHERE account_id = $1 AND platform = $2
            ",
        )
        .bind(account_id.into_inner())
        .bind(platform.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(PlatformConnection::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_by_account(&self, account_id: AccountId) -> RepoResult<Vec<PlatformConnection>> {
        let rows = sqlx::query_as::<_, ConnectionModel>(
            r"
            SELECT id, account_id, platform, access_token, refresh_token, account_ref,
                   location_ref, account_name, connected_at
            FROM platform_connections
            WHERE account_id = $1
            ORDER BY connected_at, id
            ",
        )
        .bind(account_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_rows(rows)
    }

    #[instrument(skip(self))]
    async fn count_by_account(&self, account_id: AccountId) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM platform_connections WHERE account_id = $1",
        )
        .bind(account_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn upsert(&self, connection: &NewConnection) -> RepoResult<PlatformConnection> {
        // The unique (account_id, platform) constraint makes concurrent callbacks converge
        let model = sqlx::query_as::<_, ConnectionModel>(
            r"
            INSERT INTO platform_connections (account_id, platform, access_token, refresh_token)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (account_id, platform) DO UPDATE
            SET access_token = EXCLUDED.access_token,
                refresh_token = COALESCE(EXCLUDED.refresh_token, platform_connections.refresh_token),
                connected_at = NOW()
            RETURNING id, account_id, platform, access_token, refresh_token, account_ref,
                      location_ref, account_name, connected_at
            ",
        )
        .bind(connection.account_id.into_inner())
        .bind(connection.platform.as_str())
        .bind(&connection.access_token)
        .bind(&connection.refresh_token)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        PlatformConnection::try_from(model)
    }

    #[instrument(skip(self, access_token))]
    async fn update_access_token(
        &self,
        account_id: AccountId,
        id: ConnectionId,
        access_token: &str,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE platform_connections SET access_token = $3 WHERE id = $1 AND account_id = $2",
        )
        .bind(id.into_inner())
        .bind(account_id.into_inner())
        .bind(access_token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ConnectionNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_location(
        &self,
        account_id: AccountId,
        id: ConnectionId,
        account_ref: &str,
        location_ref: &str,
        account_name: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE platform_connections
            SET account_ref = $3, location_ref = $4, account_name = COALESCE($5, account_name)
            WHERE id = $1 AND account_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(account_id.into_inner())
        .bind(account_ref)
        .bind(location_ref)
        .bind(account_name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ConnectionNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, account_id: AccountId, id: ConnectionId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM platform_connections WHERE id = $1 AND account_id = $2")
            .bind(id.into_inner())
            .bind(account_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
