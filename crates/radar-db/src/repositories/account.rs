//! PostgreSQL implementation of AccountRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use radar_core::error::DomainError;
use radar_core::traits::{AccountRepository, RepoResult};
use radar_core::{Account, AccountId, NewAccount, Plan};

use crate::models::AccountModel;

use super::error::{convert_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of AccountRepository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new PgAccountRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, business_name, plan, stripe_customer_id, stripe_subscription_id,
                   email_notifications, created_at
            FROM accounts
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, business_name, plan, stripe_customer_id, stripe_subscription_id,
                   email_notifications, created_at
            FROM accounts
            WHERE LOWER(email) = LOWER($1)
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_customer_id(&self, customer_id: &str) -> RepoResult<Option<Account>> {
        let result = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, business_name, plan, stripe_customer_id, stripe_subscription_id,
                   email_notifications, created_at
            FROM accounts
            WHERE stripe_customer_id = $1
            ",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Account::try_from).transpose()
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, account: &NewAccount, password_hash: &str) -> RepoResult<Account> {
        let model = sqlx::query_as::<_, AccountModel>(
            r"
            INSERT INTO accounts (email, password_hash, business_name)
            VALUES ($1, $2, $3)
            RETURNING id, email, business_name, plan, stripe_customer_id, stripe_subscription_id,
                      email_notifications, created_at
            ",
        )
        .bind(&account.email)
        .bind(password_hash)
        .bind(&account.business_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Account::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update_profile(
        &self,
        id: AccountId,
        business_name: Option<&str>,
        email_notifications: Option<bool>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET business_name = COALESCE($2, business_name),
                email_notifications = COALESCE($3, email_notifications)
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(business_name)
        .bind(email_notifications)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_customer_id(&self, id: AccountId, customer_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET stripe_customer_id = $2
            WHERE id = $1 AND stripe_customer_id IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(customer_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn update_subscription(
        &self,
        id: AccountId,
        plan: Plan,
        customer_id: Option<&str>,
        subscription_id: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE accounts
            SET plan = $2, stripe_customer_id = COALESCE($3, stripe_customer_id),
                stripe_subscription_id = $4
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(plan.as_str())
        .bind(customer_id)
        .bind(subscription_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AccountNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM accounts WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_notifiable(&self) -> RepoResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountModel>(
            r"
            SELECT id, email, business_name, plan, stripe_customer_id, stripe_subscription_id,
                   email_notifications, created_at
            FROM accounts
            WHERE email_notifications
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        convert_rows(rows)
    }
}
