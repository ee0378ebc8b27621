//! Statistics service

use chrono::Utc;
use radar_core::{AccountId, ReviewStats};
use tracing::instrument;

use crate::dto::StatsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Dashboard statistics
pub struct StatsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatsService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Aggregate the account's reviews relative to the current month
    #[instrument(skip(self))]
    pub async fn stats(&self, account_id: AccountId) -> ServiceResult<StatsResponse> {
        let reviews = self.ctx.review_repo().list_all(account_id).await?;
        let connected = self.ctx.connection_repo().count_by_account(account_id).await?;

        let stats = ReviewStats::compute(&reviews, Utc::now());
        Ok(StatsResponse::new(stats, connected))
    }
}
