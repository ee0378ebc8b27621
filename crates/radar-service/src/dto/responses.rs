//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use radar_core::{MonthlyTrend, Plan, Platform, RatingDistribution};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// `{"status": "ok"}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// A URL the client should navigate to
#[derive(Debug, Clone, Serialize)]
pub struct UrlResponse {
    pub url: String,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Bearer token issued after register or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Profile of the authenticated account
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub business_name: String,
    pub plan: Plan,
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Review Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub platform: Platform,
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    /// Reply saved locally but not yet accepted by the platform
    pub reply_pending_upstream: bool,
    pub review_date: Option<DateTime<Utc>>,
}

/// Dashboard statistics
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub reviews_this_month: i64,
    pub platforms_connected: i64,
    pub rating_distribution: RatingDistribution,
    pub monthly_trend: Vec<MonthlyTrend>,
}

/// Public widget entry; carries no reply and no internal ids
#[derive(Debug, Clone, Serialize)]
pub struct WidgetReviewResponse {
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub platform: Platform,
    pub date: Option<DateTime<Utc>>,
}

// ============================================================================
// Provider Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionResponse {
    pub id: i64,
    pub platform: Platform,
    pub account_name: Option<String>,
    pub connected_at: DateTime<Utc>,
}

/// Result of a provider sync
#[derive(Debug, Clone, Serialize)]
pub struct SyncResponse {
    /// Newly stored reviews
    pub synced: usize,
}

/// Result of demo seeding
#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    pub seeded: usize,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "ok",
            service: "ReviewRadar API",
            version: "1.0.0",
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: &'static str,
}

impl ReadinessResponse {
    /// `database_healthy` is `None` when no SQL pool is configured
    pub fn ready(database_healthy: Option<bool>) -> Self {
        let database = match database_healthy {
            Some(true) => "healthy",
            Some(false) => "unhealthy",
            None => "not_configured",
        };
        Self {
            status: if database_healthy == Some(false) {
                "not_ready"
            } else {
                "ready"
            },
            timestamp: Utc::now(),
            checks: HealthChecks { database },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
