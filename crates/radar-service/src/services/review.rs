//! Review service
//!
//! Listing and replying. Replies to provider-backed reviews are stored locally
//! first and then pushed to the platform; a failed push leaves the local reply
//! marked as pending.

use chrono::Utc;
use radar_core::{Account, AccountId, DomainError, Platform, ReviewId, ReviewQuery};
use tracing::{info, instrument, warn};

use crate::dto::{ListReviewsQuery, ReplyRequest, ReviewResponse, StatusResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::google::GoogleService;

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the account's reviews, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        account_id: AccountId,
        query: ListReviewsQuery,
    ) -> ServiceResult<Vec<ReviewResponse>> {
        let platform = query
            .platform
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(str::parse::<Platform>)
            .transpose()?;

        let query = ReviewQuery::new(platform, query.rating, query.limit, query.offset);
        let reviews = self.ctx.review_repo().list(account_id, &query).await?;

        Ok(reviews.iter().map(ReviewResponse::from).collect())
    }

    /// Reply to one of the account's reviews
    #[instrument(skip(self, account, request), fields(account_id = %account.id))]
    pub async fn reply(
        &self,
        account: &Account,
        review_id: ReviewId,
        request: ReplyRequest,
    ) -> ServiceResult<StatusResponse> {
        if !account.plan.can_reply() {
            return Err(DomainError::UpgradeRequired.into());
        }

        let text = request.text.trim();
        if text.is_empty() {
            return Err(ServiceError::validation("Reply must not be blank"));
        }

        let review = self
            .ctx
            .review_repo()
            .find_by_id(account.id, review_id)
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        let connection = if review.is_provider_backed() {
            self.ctx
                .connection_repo()
                .find_by_platform(account.id, review.platform)
                .await?
        } else {
            None
        };

        self.ctx
            .review_repo()
            .save_reply(account.id, review_id, text, Utc::now(), connection.is_some())
            .await?
            .ok_or(DomainError::ReviewNotFound(review_id))?;

        let (Some(mut connection), Some(external_id)) = (connection, review.external_id.as_deref())
        else {
            info!(review_id = %review_id, "Reply stored locally");
            return Ok(StatusResponse::ok());
        };

        if let Err(e) = GoogleService::new(self.ctx)
            .push_reply(&mut connection, external_id, text)
            .await
        {
            warn!(review_id = %review_id, error = %e, "Reply saved but not delivered upstream");
            return Err(e);
        }

        self.ctx
            .review_repo()
            .mark_reply_delivered(account.id, review_id)
            .await?;

        info!(review_id = %review_id, "Reply delivered");
        Ok(StatusResponse::ok())
    }
}
