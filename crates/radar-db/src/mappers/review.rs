//! Review entity <-> model mapper

use chrono::{DateTime, Utc};
use radar_core::{AccountId, DomainError, NewReview, Platform, Review, ReviewId};

use crate::models::ReviewModel;

impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        let platform = model
            .platform
            .parse::<Platform>()
            .map_err(|_| super::corrupt("platform", &model.platform))?;

        Ok(Review {
            id: ReviewId::new(model.id),
            account_id: AccountId::new(model.account_id),
            platform,
            external_id: model.external_id,
            author_name: model.author_name,
            rating: model.rating,
            text: model.text,
            reply: model.reply,
            replied_at: model.replied_at,
            reply_pending_upstream: model.reply_pending_upstream,
            review_date: model.review_date,
            fetched_at: model.fetched_at,
            notified: model.notified,
        })
    }
}

/// Normalized review values for insertion
pub struct ReviewInsert<'a> {
    pub account_id: i64,
    pub platform: &'static str,
    pub external_id: Option<&'a str>,
    pub author_name: Option<&'a str>,
    pub rating: Option<f64>,
    pub text: Option<&'a str>,
    pub reply: Option<&'a str>,
    pub review_date: Option<DateTime<Utc>>,
}

impl<'a> ReviewInsert<'a> {
    pub fn new(account_id: AccountId, review: &'a NewReview) -> Self {
        Self {
            account_id: account_id.into_inner(),
            platform: review.platform.as_str(),
            external_id: review.external_id.as_deref(),
            author_name: review.author_name.as_deref(),
            rating: review.rating,
            text: review.text.as_deref(),
            reply: review.reply.as_deref(),
            review_date: review.review_date,
        }
    }
}
