//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 200, message = "Business name must be 1-200 characters"))]
    pub business_name: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Partial profile update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 200, message = "Business name must be 1-200 characters"))]
    pub business_name: Option<String>,

    pub email_notifications: Option<bool>,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Query string for listing reviews
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListReviewsQuery {
    /// Platform name, e.g. `google`
    pub platform: Option<String>,

    /// Exact star rating
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    pub limit: Option<i64>,

    pub offset: Option<i64>,
}

/// Reply to a review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRequest {
    #[validate(length(min = 1, max = 4096, message = "Reply must be 1-4096 characters"))]
    pub text: String,
}

// ============================================================================
// Provider Requests
// ============================================================================

/// Query string of the OAuth redirect
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: String,
    pub state: String,
}

// ============================================================================
// Billing Requests
// ============================================================================

/// Plan selection for checkout
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutQuery {
    pub plan: String,
}
