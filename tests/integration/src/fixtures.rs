//! Test fixtures and data generators
//!
//! Request and response bodies as a client sees them, plus signed webhook
//! payloads.

use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::Result;
use radar_integrations::WebhookVerifier;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::helpers::{assert_json, TestServer, TEST_WEBHOOK_SECRET};

static COUNTER: AtomicU32 = AtomicU32::new(0);

// ============================================================================
// Auth Fixtures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub business_name: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self {
            email: format!("eigenaar{n}@bakkerij.test"),
            password: "Geheim-wachtwoord-123".to_string(),
            business_name: format!("Bakkerij {n}"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(req: &RegisterRequest) -> Self {
        Self {
            email: req.email.clone(),
            password: req.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub business_name: String,
    pub plan: String,
    pub email_notifications: bool,
}

// ============================================================================
// Review Fixtures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub platform: String,
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub reply: Option<String>,
    pub reply_pending_upstream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub reviews_this_month: i64,
    pub platforms_connected: i64,
    pub rating_distribution: std::collections::HashMap<String, i64>,
    pub monthly_trend: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub count: i64,
    pub average: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetReview {
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub platform: String,
}

// ============================================================================
// Provider and Billing Fixtures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionResponse {
    pub id: i64,
    pub platform: String,
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncResponse {
    pub synced: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedResponse {
    pub seeded: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Registered account with its bearer token
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Register a fresh account and fetch its id
pub async fn register_account(server: &TestServer) -> Result<TestAccount> {
    let request = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &request).await?;
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await?;

    let response = server.get_auth("/api/me", &auth.access_token).await?;
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await?;

    Ok(TestAccount {
        id: profile.id,
        email: request.email,
        token: auth.access_token,
    })
}

// ============================================================================
// Webhook Fixtures
// ============================================================================

/// `checkout.session.completed` for an account and plan
pub fn checkout_completed(event_id: &str, account_id: i64, plan: &str) -> Vec<u8> {
    json!({
        "id": event_id,
        "type": "checkout.session.completed",
        "data": {"object": {
            "metadata": {"user_id": account_id.to_string(), "plan": plan},
            "customer": format!("cus_{account_id}"),
            "subscription": format!("sub_{account_id}"),
        }},
    })
    .to_string()
    .into_bytes()
}

/// A `customer.subscription.*` event
pub fn subscription_event(event_id: &str, kind: &str, customer: &str, status: &str) -> Vec<u8> {
    json!({
        "id": event_id,
        "type": kind,
        "data": {"object": {"customer": customer, "status": status}},
    })
    .to_string()
    .into_bytes()
}

/// Signature header for a payload, signed now with the test secret
pub fn sign_webhook(payload: &[u8]) -> Result<String> {
    WebhookVerifier::new(TEST_WEBHOOK_SECRET)
        .sign(payload, chrono::Utc::now().timestamp())
        .map_err(|e| anyhow::anyhow!("Sign error: {e}"))
}
