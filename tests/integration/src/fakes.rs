//! Scripted stand-ins for the external services
//!
//! Each fake records what the application asked of it so tests can assert on
//! outbound calls without a network.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use radar_core::AccountId;
use radar_integrations::{
    BillingGateway, CheckoutRequest, Delivery, EmailMessage, IntegrationError,
    IntegrationResult, Mailer, OAuthTokens, ProviderLocation, RawReview, ReviewProvider,
};
use tokio::sync::Mutex;

pub const FAKE_ACCOUNT_REF: &str = "accounts/111";
pub const FAKE_LOCATION_REF: &str = "locations/222";
pub const FAKE_ACCESS_TOKEN: &str = "ya29.initial";
pub const FAKE_REFRESHED_TOKEN: &str = "ya29.refreshed";
pub const FAKE_REFRESH_TOKEN: &str = "1//refresh";

/// A reply the provider was asked to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedReply {
    pub access_token: String,
    pub review_ref: String,
    pub text: String,
}

/// Build a provider review in the v4 wire shape
pub fn raw_review(review_id: &str, stars: &str, comment: &str, created: &str) -> RawReview {
    serde_json::from_value(serde_json::json!({
        "name": format!("{FAKE_ACCOUNT_REF}/{FAKE_LOCATION_REF}/reviews/{review_id}"),
        "reviewId": review_id,
        "reviewer": {"displayName": "Klant"},
        "starRating": stars,
        "comment": comment,
        "createTime": created,
    }))
    .unwrap_or_default()
}

/// Scripted Google Business Profile
#[derive(Default)]
pub struct FakeProvider {
    reviews: Mutex<Vec<RawReview>>,
    replies: Mutex<Vec<PostedReply>>,
    refreshes: Mutex<usize>,
    no_location: AtomicBool,
    reject_next_token: AtomicBool,
    fail_fetch: AtomicBool,
    fail_reply: AtomicBool,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reviews returned by every fetch
    pub async fn set_reviews(&self, reviews: Vec<RawReview>) {
        *self.reviews.lock().await = reviews;
    }

    /// Report no business location
    pub fn without_location(&self) {
        self.no_location.store(true, Ordering::SeqCst);
    }

    /// Reject the next call carrying the initial token with 401
    pub fn expire_token(&self) {
        self.reject_next_token.store(true, Ordering::SeqCst);
    }

    /// Fail review fetches with a 503
    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Fail reply delivery with a 503
    pub fn fail_reply(&self, fail: bool) {
        self.fail_reply.store(fail, Ordering::SeqCst);
    }

    pub async fn replies(&self) -> Vec<PostedReply> {
        self.replies.lock().await.clone()
    }

    pub async fn refresh_count(&self) -> usize {
        *self.refreshes.lock().await
    }

    fn check_token(&self, access_token: &str) -> IntegrationResult<()> {
        if access_token == FAKE_ACCESS_TOKEN && self.reject_next_token.swap(false, Ordering::SeqCst)
        {
            return Err(IntegrationError::Unauthorized { service: "google" });
        }
        Ok(())
    }
}

fn unavailable() -> IntegrationError {
    IntegrationError::Upstream {
        service: "google",
        status: 503,
    }
}

#[async_trait]
impl ReviewProvider for FakeProvider {
    fn authorization_url(&self, state: &str) -> IntegrationResult<String> {
        Ok(format!("https://accounts.example.test/o/oauth2/auth?state={state}"))
    }

    async fn exchange_code(&self, code: &str) -> IntegrationResult<OAuthTokens> {
        if code == "bad-code" {
            return Err(IntegrationError::Upstream {
                service: "google",
                status: 400,
            });
        }
        Ok(OAuthTokens {
            access_token: FAKE_ACCESS_TOKEN.to_string(),
            refresh_token: Some(FAKE_REFRESH_TOKEN.to_string()),
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> IntegrationResult<String> {
        if refresh_token != FAKE_REFRESH_TOKEN {
            return Err(IntegrationError::Unauthorized { service: "google" });
        }
        *self.refreshes.lock().await += 1;
        Ok(FAKE_REFRESHED_TOKEN.to_string())
    }

    async fn discover_location(
        &self,
        access_token: &str,
    ) -> IntegrationResult<Option<ProviderLocation>> {
        self.check_token(access_token)?;
        if self.no_location.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(ProviderLocation {
            account_ref: FAKE_ACCOUNT_REF.to_string(),
            location_ref: FAKE_LOCATION_REF.to_string(),
            account_name: Some("Bakkerij Jansen".to_string()),
        }))
    }

    async fn fetch_reviews(
        &self,
        access_token: &str,
        _account_ref: &str,
        _location_ref: &str,
    ) -> IntegrationResult<Vec<RawReview>> {
        self.check_token(access_token)?;
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.reviews.lock().await.clone())
    }

    async fn post_reply(
        &self,
        access_token: &str,
        review_ref: &str,
        text: &str,
    ) -> IntegrationResult<()> {
        self.check_token(access_token)?;
        if self.fail_reply.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.replies.lock().await.push(PostedReply {
            access_token: access_token.to_string(),
            review_ref: review_ref.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Billing gateway returning predictable URLs
#[derive(Default)]
pub struct FakeBilling {
    customers: Mutex<Vec<AccountId>>,
    checkouts: Mutex<Vec<CheckoutRequest>>,
    portals: Mutex<Vec<(String, String)>>,
}

impl FakeBilling {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn customers(&self) -> Vec<AccountId> {
        self.customers.lock().await.clone()
    }

    pub async fn checkouts(&self) -> Vec<CheckoutRequest> {
        self.checkouts.lock().await.clone()
    }

    /// `(customer_id, return_url)` of each portal session
    pub async fn portals(&self) -> Vec<(String, String)> {
        self.portals.lock().await.clone()
    }
}

#[async_trait]
impl BillingGateway for FakeBilling {
    async fn create_customer(
        &self,
        account_id: AccountId,
        _email: &str,
        _name: &str,
    ) -> IntegrationResult<String> {
        self.customers.lock().await.push(account_id);
        Ok(format!("cus_{account_id}"))
    }

    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> IntegrationResult<String> {
        self.checkouts.lock().await.push(request.clone());
        Ok(format!(
            "https://checkout.example.test/{}/{}",
            request.customer_id, request.plan
        ))
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> IntegrationResult<String> {
        self.portals
            .lock()
            .await
            .push((customer_id.to_string(), return_url.to_string()));
        Ok(format!("https://billing.example.test/{customer_id}"))
    }
}

/// Mailer that keeps every message, optionally failing or only logging instead
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail: AtomicBool,
    log_only: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Behave like a mailer without SMTP settings
    pub fn log_only(&self, log_only: bool) {
        self.log_only.store(log_only, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> IntegrationResult<Delivery> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(IntegrationError::Mail("smtp unavailable".to_string()));
        }
        if self.log_only.load(Ordering::SeqCst) {
            return Ok(Delivery::Logged);
        }
        self.sent.lock().await.push(message.clone());
        Ok(Delivery::Sent)
    }
}
