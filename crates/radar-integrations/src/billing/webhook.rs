//! Stripe webhook verification and event interpretation
//!
//! Signatures are checked by hand against the `Stripe-Signature` header
//! (`t=<unix>,v1=<hex hmac>`), then the payload is parsed into the few event
//! kinds that change an account's plan.

use std::collections::HashMap;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use radar_core::{AccountId, Plan};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::{IntegrationError, IntegrationResult};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a signed webhook, in seconds
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";
pub const SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";

/// A verified webhook event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub id: String,
    pub kind: String,
    pub event: BillingEvent,
}

/// Plan changes carried by a webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    /// Checkout completed - activate the purchased plan
    CheckoutCompleted {
        account_id: AccountId,
        plan: Plan,
        customer_id: Option<String>,
        subscription_id: Option<String>,
    },

    /// Subscription cancelled - back to free
    SubscriptionDeleted { customer_id: String },

    /// Subscription status changed
    SubscriptionUpdated { customer_id: String, status: String },

    /// Event kind that does not affect accounts
    Ignored,
}

impl BillingEvent {
    /// Subscription statuses that keep paid features enabled
    pub fn is_active_status(status: &str) -> bool {
        matches!(status, "active" | "trialing")
    }
}

/// Verifies `Stripe-Signature` headers with the endpoint secret
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Verify the signature and parse the event
    pub fn construct_event(&self, payload: &[u8], signature: &str) -> IntegrationResult<WebhookEvent> {
        self.verify(payload, signature, chrono::Utc::now().timestamp())?;
        parse_event(payload)
    }

    /// Check a signature header against the payload at time `now`
    pub fn verify(&self, payload: &[u8], signature: &str, now: i64) -> IntegrationResult<()> {
        let mut timestamp: Option<i64> = None;
        let mut candidates: Vec<&str> = Vec::new();

        for part in signature.split(',') {
            if let Some((key, value)) = part.trim().split_once('=') {
                match key {
                    "t" => timestamp = value.parse().ok(),
                    "v1" => candidates.push(value),
                    _ => {}
                }
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            IntegrationError::WebhookSignature("missing timestamp".to_string())
        })?;
        if candidates.is_empty() {
            return Err(IntegrationError::WebhookSignature(
                "missing v1 signature".to_string(),
            ));
        }

        if (now - timestamp).abs() > self.tolerance_secs {
            tracing::warn!(timestamp, now, "Webhook timestamp outside tolerance");
            return Err(IntegrationError::WebhookSignature(
                "timestamp outside tolerance".to_string(),
            ));
        }

        let matched = candidates.iter().any(|candidate| {
            let Ok(expected) = hex::decode(candidate) else {
                return false;
            };
            self.mac_for(timestamp, payload)
                .is_some_and(|mac| mac.verify_slice(&expected).is_ok())
        });

        if matched {
            Ok(())
        } else {
            Err(IntegrationError::WebhookSignature(
                "signature mismatch".to_string(),
            ))
        }
    }

    /// Header value for a payload, as Stripe would send it
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> IntegrationResult<String> {
        let mac = self
            .mac_for(timestamp, payload)
            .ok_or_else(|| IntegrationError::Config("invalid webhook secret".to_string()))?;
        Ok(format!(
            "t={timestamp},v1={}",
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    fn mac_for(&self, timestamp: i64, payload: &[u8]) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).ok()?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Some(mac)
    }
}

#[derive(Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    data: RawEventData,
}

#[derive(Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

#[derive(Deserialize)]
struct CheckoutSessionObject {
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    customer: Option<String>,
    #[serde(default)]
    subscription: Option<String>,
}

#[derive(Deserialize)]
struct SubscriptionObject {
    customer: String,
    status: String,
}

/// Parse a webhook payload into a billing event
pub fn parse_event(payload: &[u8]) -> IntegrationResult<WebhookEvent> {
    let raw: RawEvent = serde_json::from_slice(payload)
        .map_err(|e| IntegrationError::WebhookParse(e.to_string()))?;

    let event = match raw.kind.as_str() {
        CHECKOUT_COMPLETED => {
            let session: CheckoutSessionObject = object_as(raw.data.object)?;
            checkout_completed(session, &raw.id)
        }
        SUBSCRIPTION_DELETED => {
            let subscription: SubscriptionObject = object_as(raw.data.object)?;
            BillingEvent::SubscriptionDeleted {
                customer_id: subscription.customer,
            }
        }
        SUBSCRIPTION_UPDATED => {
            let subscription: SubscriptionObject = object_as(raw.data.object)?;
            BillingEvent::SubscriptionUpdated {
                customer_id: subscription.customer,
                status: subscription.status,
            }
        }
        _ => BillingEvent::Ignored,
    };

    Ok(WebhookEvent {
        id: raw.id,
        kind: raw.kind,
        event,
    })
}

fn object_as<T: serde::de::DeserializeOwned>(object: serde_json::Value) -> IntegrationResult<T> {
    serde_json::from_value(object).map_err(|e| IntegrationError::WebhookParse(e.to_string()))
}

fn checkout_completed(session: CheckoutSessionObject, event_id: &str) -> BillingEvent {
    let account_id = session
        .metadata
        .get("user_id")
        .and_then(|id| AccountId::from_str(id).ok());
    let plan = session
        .metadata
        .get("plan")
        .and_then(|p| Plan::from_str(p).ok())
        .filter(|p| p.is_paid());

    match (account_id, plan) {
        (Some(account_id), Some(plan)) => BillingEvent::CheckoutCompleted {
            account_id,
            plan,
            customer_id: session.customer,
            subscription_id: session.subscription,
        },
        _ => {
            tracing::warn!(event_id, "Checkout session without usable metadata");
            BillingEvent::Ignored
        }
    }
}
