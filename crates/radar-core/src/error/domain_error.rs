//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AccountId, ConnectionId, ReviewId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Review not found: {0}")]
    ReviewNotFound(ReviewId),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    #[error("Platform is not connected: {0}")]
    PlatformNotConnected(&'static str),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("No billing customer for this account")]
    NoBillingCustomer,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Upgrade required to use this feature")]
    UpgradeRequired,

    #[error("Widget is only available on the Pro plan")]
    WidgetUnavailable,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::ConnectionNotFound(_) => "UNKNOWN_CONNECTION",
            Self::PlatformNotConnected(_) => "PLATFORM_NOT_CONNECTED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPlan(_) => "INVALID_PLAN",
            Self::UnknownPlatform(_) => "UNKNOWN_PLATFORM",
            Self::NoBillingCustomer => "NO_BILLING_CUSTOMER",

            // Authorization
            Self::UpgradeRequired => "UPGRADE_REQUIRED",
            Self::WidgetUnavailable => "WIDGET_UNAVAILABLE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_) | Self::ReviewNotFound(_) | Self::ConnectionNotFound(_)
        )
    }

    /// Check if this is a validation error
    ///
    /// A missing platform connection counts as bad input for the calling request.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidPlan(_)
                | Self::UnknownPlatform(_)
                | Self::NoBillingCustomer
                | Self::PlatformNotConnected(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::UpgradeRequired | Self::WidgetUnavailable)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}
