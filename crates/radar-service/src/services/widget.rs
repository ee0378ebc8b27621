//! Public review widget
//!
//! Serves an account's best recent reviews without authentication. Only Pro
//! accounts expose a widget; unknown accounts get the same answer so the
//! endpoint does not reveal which ids exist.

use radar_core::{AccountId, DomainError};
use tracing::instrument;

use crate::dto::WidgetReviewResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Lowest rating shown in the widget
pub const WIDGET_MIN_RATING: f64 = 4.0;

/// Number of reviews shown in the widget
pub const WIDGET_LIMIT: i64 = 10;

/// Widget service
pub struct WidgetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WidgetService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn widget(&self, account_id: AccountId) -> ServiceResult<Vec<WidgetReviewResponse>> {
        let account = self.ctx.account_repo().find_by_id(account_id).await?;
        if !account.is_some_and(|a| a.plan.has_widget()) {
            return Err(DomainError::WidgetUnavailable.into());
        }

        let reviews = self
            .ctx
            .review_repo()
            .list_top_rated(account_id, WIDGET_MIN_RATING, WIDGET_LIMIT)
            .await?;

        Ok(reviews.iter().map(WidgetReviewResponse::from).collect())
    }
}
