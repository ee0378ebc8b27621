//! # radar-integrations
//!
//! Clients for the services ReviewRadar talks to: the Google Business Profile
//! API for reviews, Stripe for subscriptions and SMTP for notification email.
//! Each integration sits behind a trait so the service layer can run against
//! fakes in tests.

pub mod billing;
pub mod error;
pub mod google;
pub mod notify;

pub use billing::{
    BillingEvent, BillingGateway, CheckoutRequest, StripeGateway, WebhookEvent, WebhookVerifier,
};
pub use error::{IntegrationError, IntegrationResult};
pub use google::{
    normalize_review, review_resource_name, GoogleClient, OAuthTokens, ProviderLocation,
    RawReview, ReviewProvider,
};
pub use notify::{
    digest_email, mailer_from_config, new_review_email, Delivery, EmailMessage, LogMailer,
    Mailer, SmtpMailer,
};
