//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every connection and review query is
//! scoped by the owning account.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Account, NewAccount, NewConnection, NewReview, PlatformConnection, Review, ReviewQuery,
};
use crate::error::DomainError;
use crate::value_objects::{AccountId, ConnectionId, Plan, Platform, ReviewId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>>;

    /// Find account by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;

    /// Find the account owning a billing customer
    async fn find_by_customer_id(&self, customer_id: &str) -> RepoResult<Option<Account>>;

    /// Create a new account on the free plan
    ///
    /// Returns `DomainError::EmailAlreadyExists` when the email is taken.
    async fn create(&self, account: &NewAccount, password_hash: &str) -> RepoResult<Account>;

    /// Update owner-editable fields; `None` leaves a field unchanged
    async fn update_profile(
        &self,
        id: AccountId,
        business_name: Option<&str>,
        email_notifications: Option<bool>,
    ) -> RepoResult<()>;

    /// Attach a billing customer if the account has none yet
    ///
    /// Returns false when another customer id was already stored.
    async fn set_customer_id(&self, id: AccountId, customer_id: &str) -> RepoResult<bool>;

    /// Write plan and billing references from a webhook event
    async fn update_subscription(
        &self,
        id: AccountId,
        plan: Plan,
        customer_id: Option<&str>,
        subscription_id: Option<&str>,
    ) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>>;

    /// Accounts with email notifications enabled
    async fn list_notifiable(&self) -> RepoResult<Vec<Account>>;
}

// ============================================================================
// Connection Repository
// ============================================================================

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Find the connection for an account and platform
    async fn find_by_platform(
        &self,
        account_id: AccountId,
        platform: Platform,
    ) -> RepoResult<Option<PlatformConnection>>;

    /// List all connections of an account
    async fn list_by_account(&self, account_id: AccountId) -> RepoResult<Vec<PlatformConnection>>;

    /// Count connections of an account
    async fn count_by_account(&self, account_id: AccountId) -> RepoResult<i64>;

    /// Insert or replace the single connection for (account, platform)
    ///
    /// A `None` refresh token keeps the stored one.
    async fn upsert(&self, connection: &NewConnection) -> RepoResult<PlatformConnection>;

    /// Replace the access token after a refresh
    async fn update_access_token(
        &self,
        account_id: AccountId,
        id: ConnectionId,
        access_token: &str,
    ) -> RepoResult<()>;

    /// Store the discovered provider account and location
    async fn update_location(
        &self,
        account_id: AccountId,
        id: ConnectionId,
        account_ref: &str,
        location_ref: &str,
        account_name: Option<&str>,
    ) -> RepoResult<()>;

    /// Delete a connection owned by the account, returns false if none matched
    async fn delete(&self, account_id: AccountId, id: ConnectionId) -> RepoResult<bool>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find a review owned by the account
    async fn find_by_id(&self, account_id: AccountId, id: ReviewId) -> RepoResult<Option<Review>>;

    /// List reviews newest first (undated reviews last)
    async fn list(&self, account_id: AccountId, query: &ReviewQuery) -> RepoResult<Vec<Review>>;

    /// All reviews of an account, for aggregation
    async fn list_all(&self, account_id: AccountId) -> RepoResult<Vec<Review>>;

    /// Insert reviews in a single transaction, skipping external ids that
    /// are already stored. Returns only the rows that were inserted.
    async fn insert_new(&self, account_id: AccountId, reviews: &[NewReview])
        -> RepoResult<Vec<Review>>;

    /// Record a reply locally
    async fn save_reply(
        &self,
        account_id: AccountId,
        id: ReviewId,
        reply: &str,
        replied_at: DateTime<Utc>,
        pending_upstream: bool,
    ) -> RepoResult<Option<Review>>;

    /// Clear the pending flag once the platform accepted the reply
    async fn mark_reply_delivered(&self, account_id: AccountId, id: ReviewId) -> RepoResult<()>;

    /// Most recent reviews with at least `min_rating`
    async fn list_top_rated(
        &self,
        account_id: AccountId,
        min_rating: f64,
        limit: i64,
    ) -> RepoResult<Vec<Review>>;

    /// Reviews fetched since `since` that have not been included in a notification
    async fn list_unnotified_since(
        &self,
        account_id: AccountId,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Review>>;

    /// Flag reviews as notified
    async fn mark_notified(&self, account_id: AccountId, ids: &[ReviewId]) -> RepoResult<()>;
}

// ============================================================================
// Billing Event Repository
// ============================================================================

#[async_trait]
pub trait BillingEventRepository: Send + Sync {
    /// Whether a webhook event id was already processed
    async fn is_processed(&self, event_id: &str) -> RepoResult<bool>;

    /// Record a processed webhook event, returns false if it was already recorded
    async fn record(&self, event_id: &str, kind: &str) -> RepoResult<bool>;
}
