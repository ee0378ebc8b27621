//! Stripe subscription billing

mod gateway;
mod webhook;

pub use gateway::{BillingGateway, CheckoutRequest, StripeGateway};
pub use webhook::{
    parse_event, BillingEvent, WebhookEvent, WebhookVerifier, CHECKOUT_COMPLETED,
    DEFAULT_TOLERANCE_SECS, SUBSCRIPTION_DELETED, SUBSCRIPTION_UPDATED,
};
