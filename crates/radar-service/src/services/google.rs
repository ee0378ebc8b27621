//! Google Business Profile service
//!
//! OAuth connect/callback, review sync and reply delivery. Every provider call
//! that is rejected with 401 is retried once after refreshing the stored
//! access token.

use std::future::Future;

use radar_core::{
    Account, AccountId, DomainError, NewConnection, NewReview, Platform, PlatformConnection,
};
use radar_integrations::{
    normalize_review, review_resource_name, IntegrationError, IntegrationResult,
};
use tracing::{info, instrument, warn};

use crate::dto::{OAuthCallbackQuery, SyncResponse, UrlResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

const NO_LOCATION: &str = "No Google Business location found for this account";

/// Google integration service
pub struct GoogleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GoogleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Consent screen URL with a signed state naming the caller
    #[instrument(skip(self))]
    pub fn connect_url(&self, account_id: AccountId) -> ServiceResult<UrlResponse> {
        let state = self.ctx.jwt_service().issue_oauth_state(account_id)?;
        let url = self.ctx.review_provider().authorization_url(&state)?;
        Ok(UrlResponse { url })
    }

    /// Complete the OAuth flow, returning the dashboard URL to redirect to
    #[instrument(skip(self, query))]
    pub async fn handle_callback(&self, query: OAuthCallbackQuery) -> ServiceResult<String> {
        let account_id = self.ctx.jwt_service().validate_oauth_state(&query.state)?;

        if self.ctx.account_repo().find_by_id(account_id).await?.is_none() {
            return Err(DomainError::AccountNotFound(account_id).into());
        }

        let tokens = self.ctx.review_provider().exchange_code(&query.code).await?;

        let mut connection = self
            .ctx
            .connection_repo()
            .upsert(&NewConnection {
                account_id,
                platform: Platform::Google,
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            })
            .await?;

        info!(account_id = %account_id, connection_id = %connection.id, "Google connected");

        // Discovery is retried lazily on sync
        if let Err(e) = self.ensure_location(&mut connection).await {
            warn!(error = %e, "Google location discovery failed");
        }

        Ok(self.ctx.settings().dashboard_url(Some("connected=google")))
    }

    /// Fetch the location's reviews and store the ones not seen before
    ///
    /// Inserts happen in one transaction: either every new review is stored
    /// or none is. Notifications go out after the rows are committed.
    #[instrument(skip(self, account), fields(account_id = %account.id))]
    pub async fn sync(&self, account: &Account) -> ServiceResult<SyncResponse> {
        let mut connection = self
            .ctx
            .connection_repo()
            .find_by_platform(account.id, Platform::Google)
            .await?
            .ok_or(DomainError::PlatformNotConnected(Platform::Google.as_str()))?;

        let Some((account_ref, location_ref)) = self.ensure_location(&mut connection).await?
        else {
            return Err(ServiceError::validation(NO_LOCATION));
        };

        let provider = self.ctx.review_provider();
        let (account_ref, location_ref) = (account_ref.as_str(), location_ref.as_str());
        let raw_reviews = self
            .with_fresh_token(&mut connection, move |token| async move {
                provider
                    .fetch_reviews(&token, account_ref, location_ref)
                    .await
            })
            .await?;

        let fetched = raw_reviews.len();
        let new_reviews: Vec<NewReview> = raw_reviews
            .iter()
            .map(normalize_review)
            .filter(|review| review.external_id.is_some())
            .collect();

        let inserted = self
            .ctx
            .review_repo()
            .insert_new(account.id, &new_reviews)
            .await?;

        info!(fetched, inserted = inserted.len(), "Google sync finished");

        NotificationService::new(self.ctx)
            .notify_new_reviews(account, &inserted)
            .await;

        Ok(SyncResponse {
            synced: inserted.len(),
        })
    }

    /// Publish a reply on the platform
    #[instrument(skip(self, connection, text), fields(connection_id = %connection.id))]
    pub async fn push_reply(
        &self,
        connection: &mut PlatformConnection,
        external_id: &str,
        text: &str,
    ) -> ServiceResult<()> {
        let review_ref = match self.ensure_location(connection).await? {
            Some((account_ref, location_ref)) => {
                review_resource_name(&account_ref, &location_ref, external_id)
            }
            None if external_id.starts_with("accounts/") => external_id.to_string(),
            None => return Err(ServiceError::validation(NO_LOCATION)),
        };

        let provider = self.ctx.review_provider();
        let review_ref = review_ref.as_str();
        self.with_fresh_token(connection, move |token| async move {
            provider.post_reply(&token, review_ref, text).await
        })
        .await
    }

    /// Account and location refs of the connection, discovering them if unknown
    async fn ensure_location(
        &self,
        connection: &mut PlatformConnection,
    ) -> ServiceResult<Option<(String, String)>> {
        if let Some((account_ref, location_ref)) = connection.location() {
            return Ok(Some((account_ref.to_string(), location_ref.to_string())));
        }

        let provider = self.ctx.review_provider();
        let discovered = self
            .with_fresh_token(connection, move |token| async move {
                provider.discover_location(&token).await
            })
            .await?;

        let Some(location) = discovered else {
            return Ok(None);
        };

        self.ctx
            .connection_repo()
            .update_location(
                connection.account_id,
                connection.id,
                &location.account_ref,
                &location.location_ref,
                location.account_name.as_deref(),
            )
            .await?;

        connection.account_ref = Some(location.account_ref.clone());
        connection.location_ref = Some(location.location_ref.clone());
        connection.account_name = location.account_name;

        Ok(Some((location.account_ref, location.location_ref)))
    }

    /// Run a provider call, refreshing the access token once on 401
    async fn with_fresh_token<T, F, Fut>(
        &self,
        connection: &mut PlatformConnection,
        call: F,
    ) -> ServiceResult<T>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = IntegrationResult<T>>,
    {
        match call(connection.access_token.clone()).await {
            Err(e) if e.is_unauthorized() => {
                let token = self.refresh_access_token(connection).await?;
                Ok(call(token).await?)
            }
            other => Ok(other?),
        }
    }

    async fn refresh_access_token(
        &self,
        connection: &mut PlatformConnection,
    ) -> ServiceResult<String> {
        let Some(refresh_token) = connection.refresh_token.as_deref() else {
            return Err(IntegrationError::Unauthorized { service: "google" }.into());
        };

        let token = self
            .ctx
            .review_provider()
            .refresh_access_token(refresh_token)
            .await?;

        self.ctx
            .connection_repo()
            .update_access_token(connection.account_id, connection.id, &token)
            .await?;
        connection.access_token.clone_from(&token);

        info!(connection_id = %connection.id, "Google access token refreshed");
        Ok(token)
    }
}
