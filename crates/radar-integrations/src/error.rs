//! Integration error types

use thiserror::Error;

/// Result type alias for integration calls
pub type IntegrationResult<T> = std::result::Result<T, IntegrationError>;

/// Errors raised while talking to an external service
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// The provider rejected the access token
    #[error("{service} rejected the credentials")]
    Unauthorized { service: &'static str },

    /// Non-success HTTP status from a provider
    #[error("{service} responded with status {status}")]
    Upstream { service: &'static str, status: u16 },

    /// Network failure or timeout
    #[error("{service} request failed: {message}")]
    Transport {
        service: &'static str,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("{service} returned an unexpected response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },

    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Webhook signature verification failed
    #[error("Webhook signature invalid: {0}")]
    WebhookSignature(String),

    /// Webhook payload parsing failed
    #[error("Webhook parse error: {0}")]
    WebhookParse(String),

    /// Email could not be built or delivered
    #[error("Mail error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntegrationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the error means the stored credentials must be refreshed
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "The platform connection has expired. Please reconnect.",
            Self::Upstream { .. } | Self::Transport { .. } | Self::InvalidResponse { .. } => {
                "The review platform could not be reached. Please try again later."
            }
            Self::Stripe(_) => "Payment processing failed. Please try again.",
            Self::WebhookSignature(_) | Self::WebhookParse(_) => "Invalid webhook payload.",
            Self::Mail(_) => "Email could not be sent.",
            Self::Config(_) => "Service configuration error.",
        }
    }
}
