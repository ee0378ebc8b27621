//! Test helpers for integration tests
//!
//! Spawns the real application on an ephemeral port, backed by the in-memory
//! store and the fakes, and wraps the HTTP calls tests make against it.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use radar_api::{create_app, AppState};
use radar_common::{AppConfig, JwtService};
use radar_integrations::WebhookVerifier;
use radar_service::{ServiceContext, ServiceSettings};
use reqwest::{redirect, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fakes::{FakeBilling, FakeProvider, RecordingMailer};
use crate::memory::MemoryStore;

pub const TEST_WEBHOOK_SECRET: &str = "whsec_integration_secret";
pub const TEST_FRONTEND_URL: &str = "https://app.reviewradar.test";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<FakeProvider>,
    pub billing: Arc<FakeBilling>,
    pub mailer: Arc<RecordingMailer>,
    pub context: ServiceContext,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_env(&[]).await
    }

    /// Start a test server with extra configuration values
    pub async fn start_with_env(overrides: &[(&'static str, &'static str)]) -> Result<Self> {
        let config = test_config(overrides)?;

        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(FakeProvider::new());
        let billing = Arc::new(FakeBilling::new());
        let mailer = Arc::new(RecordingMailer::new());

        let context = ServiceContext::builder()
            .account_repo(store.clone())
            .connection_repo(store.clone())
            .review_repo(store.clone())
            .billing_event_repo(store.clone())
            .review_provider(provider.clone())
            .billing_gateway(billing.clone())
            .webhook_verifier(WebhookVerifier::new(config.stripe.webhook_secret.clone()))
            .mailer(mailer.clone())
            .jwt_service(Arc::new(JwtService::new(
                &config.jwt.secret,
                config.jwt.access_token_expiry,
                config.jwt.oauth_state_expiry,
            )))
            .settings(ServiceSettings::from_config(&config))
            .build()
            .map_err(|e| anyhow::anyhow!("Context error: {e}"))?;

        let app = create_app(AppState::new(context.clone(), config));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            provider,
            billing,
            mailer,
            context,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token and JSON body
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a PATCH request with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Deliver a raw webhook body with the given signature header
    pub async fn post_webhook(&self, payload: &[u8], signature: Option<&str>) -> Result<Response> {
        let mut request = self
            .client
            .post(self.url("/api/webhooks/stripe"))
            .header("content-type", "application/json")
            .body(payload.to_vec());
        if let Some(signature) = signature {
            request = request.header("stripe-signature", signature);
        }
        Ok(request.send().await?)
    }
}

/// Create a test configuration
pub fn test_config(overrides: &[(&'static str, &'static str)]) -> Result<AppConfig> {
    let mut env: HashMap<&'static str, &'static str> = HashMap::from([
        ("API_PORT", "0"),
        ("DATABASE_URL", "postgres://localhost/reviewradar_test"),
        ("JWT_SECRET", "integration-test-secret-that-is-long-enough"),
        ("GOOGLE_CLIENT_ID", "client-id"),
        ("GOOGLE_CLIENT_SECRET", "client-secret"),
        ("GOOGLE_REDIRECT_URI", "http://localhost/api/google/callback"),
        ("STRIPE_SECRET_KEY", "sk_test_integration"),
        ("STRIPE_WEBHOOK_SECRET", TEST_WEBHOOK_SECRET),
        ("STRIPE_STARTER_PRICE_ID", "price_starter"),
        ("STRIPE_PRO_PRICE_ID", "price_pro"),
        ("FRONTEND_URL", TEST_FRONTEND_URL),
    ]);
    env.extend(overrides.iter().copied());

    AppConfig::from_lookup(|key| env.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status only
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Error code of a JSON error response
pub async fn error_code(response: Response) -> Result<String> {
    let body: serde_json::Value = response.json().await?;
    body["error"]["code"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("No error code in {body}"))
}
