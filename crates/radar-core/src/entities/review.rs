//! Review entity - a customer review collected from a platform

use chrono::{DateTime, Utc};

use crate::value_objects::{AccountId, Platform, ReviewId};

/// Stored review owned by one account
///
/// Reviews are never deleted; `external_id` is unique per account when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub account_id: AccountId,
    pub platform: Platform,
    pub external_id: Option<String>,
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    /// Local reply saved but not yet accepted by the platform
    pub reply_pending_upstream: bool,
    pub review_date: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub notified: bool,
}

impl Review {
    /// Whole stars (0-5), truncating fractional ratings
    pub fn stars(&self) -> u8 {
        rating_stars(self.rating)
    }

    /// Replies to this review must also be delivered to the platform
    pub fn is_provider_backed(&self) -> bool {
        self.platform.supports_reply() && self.external_id.is_some()
    }

    #[inline]
    pub fn has_reply(&self) -> bool {
        self.reply.is_some()
    }
}

/// Truncate a rating to a whole star count clamped to 0..=5
pub fn rating_stars(rating: Option<f64>) -> u8 {
    match rating {
        Some(r) if r.is_finite() && r > 0.0 => r.floor().min(5.0) as u8,
        _ => 0,
    }
}

/// Normalized review fields ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub platform: Platform,
    pub external_id: Option<String>,
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub reply: Option<String>,
    pub review_date: Option<DateTime<Utc>>,
}

/// Filters and paging for listing an account's reviews
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewQuery {
    pub platform: Option<Platform>,
    /// Exact rating match
    pub rating: Option<i32>,
    pub limit: i64,
    pub offset: i64,
}

impl ReviewQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    /// Build a query, clamping paging values into their valid ranges
    pub fn new(
        platform: Option<Platform>,
        rating: Option<i32>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Self {
        Self {
            platform,
            rating,
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}
