//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use radar_common::AccessToken;
use radar_core::{Account, PlatformConnection, Review, ReviewStats};

use super::responses::{
    AuthResponse, ConnectionResponse, ProfileResponse, ReviewResponse, StatsResponse,
    WidgetReviewResponse,
};

// ============================================================================
// Account Mappers
// ============================================================================

impl From<AccessToken> for AuthResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.into_inner(),
            email: account.email.clone(),
            business_name: account.business_name.clone(),
            plan: account.plan,
            email_notifications: account.email_notifications,
            created_at: account.created_at,
        }
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id.into_inner(),
            platform: review.platform,
            author_name: review.author_name.clone(),
            rating: review.rating,
            text: review.text.clone(),
            reply: review.reply.clone(),
            replied_at: review.replied_at,
            reply_pending_upstream: review.reply_pending_upstream,
            review_date: review.review_date,
        }
    }
}

impl From<&Review> for WidgetReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            author: review.author_name.clone(),
            rating: review.rating,
            text: review.text.clone(),
            platform: review.platform,
            date: review.review_date,
        }
    }
}

impl StatsResponse {
    pub fn new(stats: ReviewStats, platforms_connected: i64) -> Self {
        Self {
            total_reviews: stats.total_reviews,
            average_rating: stats.average_rating,
            reviews_this_month: stats.reviews_this_month,
            platforms_connected,
            rating_distribution: stats.rating_distribution,
            monthly_trend: stats.monthly_trend,
        }
    }
}

// ============================================================================
// Connection Mappers
// ============================================================================

impl From<&PlatformConnection> for ConnectionResponse {
    fn from(connection: &PlatformConnection) -> Self {
        Self {
            id: connection.id.into_inner(),
            platform: connection.platform,
            account_name: connection.account_name.clone(),
            connected_at: connection.connected_at,
        }
    }
}
