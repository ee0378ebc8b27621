//! In-memory repositories
//!
//! One store implements every repository trait so tests can inspect state
//! directly after driving the API.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use radar_core::{
    Account, AccountId, AccountRepository, BillingEventRepository, ConnectionId,
    ConnectionRepository, DomainError, NewAccount, NewConnection, NewReview, Platform,
    PlatformConnection, Plan, RepoResult, Review, ReviewId, ReviewQuery, ReviewRepository,
};
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    accounts: Vec<(Account, String)>,
    connections: Vec<PlatformConnection>,
    reviews: Vec<Review>,
    billing_events: HashSet<String>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory backing store
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of an account
    pub async fn account(&self, id: AccountId) -> Option<Account> {
        let state = self.state.lock().await;
        state
            .accounts
            .iter()
            .find(|(a, _)| a.id == id)
            .map(|(a, _)| a.clone())
    }

    /// Change an account's plan directly
    pub async fn set_plan(&self, id: AccountId, plan: Plan) {
        let mut state = self.state.lock().await;
        if let Some((account, _)) = state.accounts.iter_mut().find(|(a, _)| a.id == id) {
            account.plan = plan;
        }
    }

    /// Every review of an account, in insertion order
    pub async fn reviews(&self, account_id: AccountId) -> Vec<Review> {
        let state = self.state.lock().await;
        state
            .reviews
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect()
    }

    /// Insert reviews directly, bypassing sync
    pub async fn add_reviews(&self, account_id: AccountId, reviews: &[NewReview]) -> Vec<Review> {
        let mut state = self.state.lock().await;
        reviews
            .iter()
            .map(|new| {
                let review = build_review(&mut state, account_id, new);
                state.reviews.push(review.clone());
                review
            })
            .collect()
    }

    /// Insert a connection directly, bypassing OAuth
    pub async fn add_connection(&self, connection: &NewConnection) -> PlatformConnection {
        let mut state = self.state.lock().await;
        let id = state.next_id();
        let connection = PlatformConnection {
            id: ConnectionId::new(id),
            account_id: connection.account_id,
            platform: connection.platform,
            access_token: connection.access_token.clone(),
            refresh_token: connection.refresh_token.clone(),
            account_ref: None,
            location_ref: None,
            account_name: None,
            connected_at: Utc::now(),
        };
        state.connections.push(connection.clone());
        connection
    }

    /// Stored connection for an account and platform
    pub async fn connection(
        &self,
        account_id: AccountId,
        platform: Platform,
    ) -> Option<PlatformConnection> {
        let state = self.state.lock().await;
        state
            .connections
            .iter()
            .find(|c| c.account_id == account_id && c.platform == platform)
            .cloned()
    }
}

fn build_review(state: &mut State, account_id: AccountId, new: &NewReview) -> Review {
    Review {
        id: ReviewId::new(state.next_id()),
        account_id,
        platform: new.platform,
        external_id: new.external_id.clone(),
        author_name: new.author_name.clone(),
        rating: new.rating,
        text: new.text.clone(),
        reply: new.reply.clone(),
        replied_at: None,
        reply_pending_upstream: false,
        review_date: new.review_date,
        fetched_at: Utc::now(),
        notified: false,
    }
}

fn find_account(state: &mut State, id: AccountId) -> RepoResult<&mut Account> {
    state
        .accounts
        .iter_mut()
        .find(|(a, _)| a.id == id)
        .map(|(a, _)| a)
        .ok_or(DomainError::AccountNotFound(id))
}

fn find_connection(
    state: &mut State,
    account_id: AccountId,
    id: ConnectionId,
) -> RepoResult<&mut PlatformConnection> {
    state
        .connections
        .iter_mut()
        .find(|c| c.id == id && c.account_id == account_id)
        .ok_or(DomainError::ConnectionNotFound(id))
}

/// Newest first, undated last, then by id descending
fn newest_first(a: &Review, b: &Review) -> std::cmp::Ordering {
    b.review_date
        .is_some()
        .cmp(&a.review_date.is_some())
        .then(b.review_date.cmp(&a.review_date))
        .then(b.id.cmp(&a.id))
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_id(&self, id: AccountId) -> RepoResult<Option<Account>> {
        Ok(self.account(id).await)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .find(|(a, _)| a.email.eq_ignore_ascii_case(email))
            .map(|(a, _)| a.clone()))
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> RepoResult<Option<Account>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .find(|(a, _)| a.stripe_customer_id.as_deref() == Some(customer_id))
            .map(|(a, _)| a.clone()))
    }

    async fn create(&self, account: &NewAccount, password_hash: &str) -> RepoResult<Account> {
        let mut state = self.state.lock().await;
        if state
            .accounts
            .iter()
            .any(|(a, _)| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(DomainError::EmailAlreadyExists);
        }

        let created = Account {
            id: AccountId::new(state.next_id()),
            email: account.email.clone(),
            business_name: account.business_name.clone(),
            plan: Plan::Free,
            stripe_customer_id: None,
            stripe_subscription_id: None,
            email_notifications: true,
            created_at: Utc::now(),
        };
        state
            .accounts
            .push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: AccountId,
        business_name: Option<&str>,
        email_notifications: Option<bool>,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let account = find_account(&mut state, id)?;
        if let Some(name) = business_name {
            account.business_name = name.to_string();
        }
        if let Some(enabled) = email_notifications {
            account.email_notifications = enabled;
        }
        Ok(())
    }

    async fn set_customer_id(&self, id: AccountId, customer_id: &str) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        let account = find_account(&mut state, id)?;
        if account.stripe_customer_id.is_some() {
            return Ok(false);
        }
        account.stripe_customer_id = Some(customer_id.to_string());
        Ok(true)
    }

    async fn update_subscription(
        &self,
        id: AccountId,
        plan: Plan,
        customer_id: Option<&str>,
        subscription_id: Option<&str>,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let account = find_account(&mut state, id)?;
        account.plan = plan;
        if let Some(customer_id) = customer_id {
            account.stripe_customer_id = Some(customer_id.to_string());
        }
        account.stripe_subscription_id = subscription_id.map(String::from);
        Ok(())
    }

    async fn get_password_hash(&self, id: AccountId) -> RepoResult<Option<String>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .find(|(a, _)| a.id == id)
            .map(|(_, hash)| hash.clone()))
    }

    async fn list_notifiable(&self) -> RepoResult<Vec<Account>> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .filter(|(a, _)| a.email_notifications)
            .map(|(a, _)| a.clone())
            .collect())
    }
}

#[async_trait]
impl ConnectionRepository for MemoryStore {
    async fn find_by_platform(
        &self,
        account_id: AccountId,
        platform: Platform,
    ) -> RepoResult<Option<PlatformConnection>> {
        Ok(self.connection(account_id, platform).await)
    }

    async fn list_by_account(&self, account_id: AccountId) -> RepoResult<Vec<PlatformConnection>> {
        let state = self.state.lock().await;
        Ok(state
            .connections
            .iter()
            .filter(|c| c.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn count_by_account(&self, account_id: AccountId) -> RepoResult<i64> {
        Ok(self.list_by_account(account_id).await?.len() as i64)
    }

    async fn upsert(&self, connection: &NewConnection) -> RepoResult<PlatformConnection> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.connections.iter_mut().find(|c| {
            c.account_id == connection.account_id && c.platform == connection.platform
        }) {
            existing.access_token.clone_from(&connection.access_token);
            if connection.refresh_token.is_some() {
                existing.refresh_token.clone_from(&connection.refresh_token);
            }
            existing.connected_at = Utc::now();
            return Ok(existing.clone());
        }

        drop(state);
        Ok(self.add_connection(connection).await)
    }

    async fn update_access_token(
        &self,
        account_id: AccountId,
        id: ConnectionId,
        access_token: &str,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let connection = find_connection(&mut state, account_id, id)?;
        connection.access_token = access_token.to_string();
        Ok(())
    }

    async fn update_location(
        &self,
        account_id: AccountId,
        id: ConnectionId,
        account_ref: &str,
        location_ref: &str,
        account_name: Option<&str>,
    ) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        let connection = find_connection(&mut state, account_id, id)?;
        connection.account_ref = Some(account_ref.to_string());
        connection.location_ref = Some(location_ref.to_string());
        if let Some(name) = account_name {
            connection.account_name = Some(name.to_string());
        }
        Ok(())
    }

    async fn delete(&self, account_id: AccountId, id: ConnectionId) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.connections.len();
        state
            .connections
            .retain(|c| !(c.id == id && c.account_id == account_id));
        Ok(state.connections.len() < before)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_by_id(&self, account_id: AccountId, id: ReviewId) -> RepoResult<Option<Review>> {
        let state = self.state.lock().await;
        Ok(state
            .reviews
            .iter()
            .find(|r| r.id == id && r.account_id == account_id)
            .cloned())
    }

    async fn list(&self, account_id: AccountId, query: &ReviewQuery) -> RepoResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews(account_id)
            .await
            .into_iter()
            .filter(|r| query.platform.map_or(true, |p| r.platform == p))
            .filter(|r| {
                query
                    .rating
                    .map_or(true, |stars| r.rating == Some(f64::from(stars)))
            })
            .collect();
        reviews.sort_by(newest_first);

        Ok(reviews
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn list_all(&self, account_id: AccountId) -> RepoResult<Vec<Review>> {
        Ok(self.reviews(account_id).await)
    }

    async fn insert_new(
        &self,
        account_id: AccountId,
        reviews: &[NewReview],
    ) -> RepoResult<Vec<Review>> {
        let mut state = self.state.lock().await;
        let mut seen: HashSet<String> = state
            .reviews
            .iter()
            .filter(|r| r.account_id == account_id)
            .filter_map(|r| r.external_id.clone())
            .collect();

        let mut inserted = Vec::new();
        for new in reviews {
            if let Some(external_id) = &new.external_id {
                if !seen.insert(external_id.clone()) {
                    continue;
                }
            }
            let review = build_review(&mut state, account_id, new);
            inserted.push(review);
        }

        state.reviews.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn save_reply(
        &self,
        account_id: AccountId,
        id: ReviewId,
        reply: &str,
        replied_at: DateTime<Utc>,
        pending_upstream: bool,
    ) -> RepoResult<Option<Review>> {
        let mut state = self.state.lock().await;
        Ok(state
            .reviews
            .iter_mut()
            .find(|r| r.id == id && r.account_id == account_id)
            .map(|review| {
                review.reply = Some(reply.to_string());
                review.replied_at = Some(replied_at);
                review.reply_pending_upstream = pending_upstream;
                review.clone()
            }))
    }

    async fn mark_reply_delivered(&self, account_id: AccountId, id: ReviewId) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        if let Some(review) = state
            .reviews
            .iter_mut()
            .find(|r| r.id == id && r.account_id == account_id)
        {
            review.reply_pending_upstream = false;
        }
        Ok(())
    }

    async fn list_top_rated(
        &self,
        account_id: AccountId,
        min_rating: f64,
        limit: i64,
    ) -> RepoResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews(account_id)
            .await
            .into_iter()
            .filter(|r| r.rating.is_some_and(|v| v >= min_rating))
            .collect();
        reviews.sort_by(newest_first);
        reviews.truncate(limit as usize);
        Ok(reviews)
    }

    async fn list_unnotified_since(
        &self,
        account_id: AccountId,
        since: DateTime<Utc>,
    ) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews(account_id)
            .await
            .into_iter()
            .filter(|r| !r.notified && r.fetched_at >= since)
            .collect())
    }

    async fn mark_notified(&self, account_id: AccountId, ids: &[ReviewId]) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        for review in state
            .reviews
            .iter_mut()
            .filter(|r| r.account_id == account_id && ids.contains(&r.id))
        {
            review.notified = true;
        }
        Ok(())
    }
}

#[async_trait]
impl BillingEventRepository for MemoryStore {
    async fn is_processed(&self, event_id: &str) -> RepoResult<bool> {
        Ok(self.state.lock().await.billing_events.contains(event_id))
    }

    async fn record(&self, event_id: &str, _kind: &str) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .billing_events
            .insert(event_id.to_string()))
    }
}
