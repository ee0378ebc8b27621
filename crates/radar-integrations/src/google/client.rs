//! Google Business Profile client
//!
//! Covers the OAuth code flow, account/location discovery, review listing and
//! replying. Transient failures (network errors, 429 and 5xx responses) are
//! retried with exponential backoff, except for the single-use authorization
//! code exchange; everything else is returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use radar_common::{GoogleConfig, HttpClientConfig};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::types::{
    AccountsResponse, LocationsResponse, OAuthTokens, ProviderLocation, RawReview,
    ReviewsResponse, TokenResponse,
};
use crate::error::{IntegrationError, IntegrationResult};

const SERVICE: &str = "google";

pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const BUSINESS_API: &str = "https://mybusinessbusinessinformation.googleapis.com/v1";
pub const REVIEWS_API: &str = "https://mybusiness.googleapis.com/v4";
pub const SCOPE: &str = "https://www.googleapis.com/auth/business.manage";

const BASE_BACKOFF_MS: u64 = 250;
const REVIEW_PAGE_SIZE: &str = "50";
const MAX_REVIEW_PAGES: usize = 20;

/// Operations against a review platform account
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Consent screen URL carrying the given state
    fn authorization_url(&self, state: &str) -> IntegrationResult<String>;

    /// Exchange an authorization code for tokens
    async fn exchange_code(&self, code: &str) -> IntegrationResult<OAuthTokens>;

    /// Obtain a fresh access token
    async fn refresh_access_token(&self, refresh_token: &str) -> IntegrationResult<String>;

    /// First business account and its first location, if any
    async fn discover_location(
        &self,
        access_token: &str,
    ) -> IntegrationResult<Option<ProviderLocation>>;

    /// All reviews of a location
    async fn fetch_reviews(
        &self,
        access_token: &str,
        account_ref: &str,
        location_ref: &str,
    ) -> IntegrationResult<Vec<RawReview>>;

    /// Create or replace the owner reply on a review
    async fn post_reply(
        &self,
        access_token: &str,
        review_ref: &str,
        text: &str,
    ) -> IntegrationResult<()>;
}

/// Whether a request may be repeated after a transient failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Retry {
    Transient,
    Never,
}

/// reqwest-backed Google Business Profile client
pub struct GoogleClient {
    http: Client,
    config: GoogleConfig,
    token_url: String,
    max_retries: u32,
}

impl GoogleClient {
    pub fn new(config: GoogleConfig, http_config: &HttpClientConfig) -> IntegrationResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(http_config.timeout_secs))
            .build()
            .map_err(|e| IntegrationError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            token_url: TOKEN_URL.to_string(),
            max_retries: http_config.max_retries,
        })
    }

    #[cfg(test)]
    fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    async fn send<F>(&self, retry: Retry, build: F) -> IntegrationResult<Response>
    where
        F: Fn() -> RequestBuilder + Send + Sync,
    {
        let max_retries = match retry {
            Retry::Transient => self.max_retries,
            Retry::Never => 0,
        };
        let mut attempt = 0;
        loop {
            let outcome = match build().send().await {
                Ok(response) => check_status(response),
                Err(e) => Err(IntegrationError::Transport {
                    service: SERVICE,
                    message: e.without_url().to_string(),
                }),
            };

            match outcome {
                Err(err) if err.is_retryable() && attempt < max_retries => {
                    let delay = backoff_delay(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Retrying Google request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, &str)],
    ) -> IntegrationResult<T> {
        let response = self
            .send(Retry::Transient, || {
                self.http.get(url).bearer_auth(access_token).query(query)
            })
            .await?;
        parse_json(response).await
    }

    async fn token_request(
        &self,
        form: &[(&str, &str)],
        retry: Retry,
    ) -> IntegrationResult<TokenResponse> {
        let response = self
            .send(retry, || self.http.post(&self.token_url).form(form))
            .await?;
        parse_json(response).await
    }
}

#[async_trait]
impl ReviewProvider for GoogleClient {
    fn authorization_url(&self, state: &str) -> IntegrationResult<String> {
        let url = Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", SCOPE),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| IntegrationError::Config(format!("authorization url: {e}")))?;

        Ok(url.into())
    }

    #[instrument(skip_all)]
    async fn exchange_code(&self, code: &str) -> IntegrationResult<OAuthTokens> {
        let tokens = self
            .token_request(
                &[
                    ("client_id", self.config.client_id.as_str()),
                    ("client_secret", self.config.client_secret.as_str()),
                    ("code", code),
                    ("grant_type", "authorization_code"),
                    ("redirect_uri", self.config.redirect_uri.as_str()),
                ],
                // The code is spent once the server has seen it
                Retry::Never,
            )
            .await?;

        Ok(OAuthTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    #[instrument(skip_all)]
    async fn refresh_access_token(&self, refresh_token: &str) -> IntegrationResult<String> {
        let tokens = self
            .token_request(
                &[
                    ("client_id", self.config.client_id.as_str()),
                    ("client_secret", self.config.client_secret.as_str()),
                    ("refresh_token", refresh_token),
                    ("grant_type", "refresh_token"),
                ],
                Retry::Transient,
            )
            .await?;

        Ok(tokens.access_token)
    }

    #[instrument(skip_all)]
    async fn discover_location(
        &self,
        access_token: &str,
    ) -> IntegrationResult<Option<ProviderLocation>> {
        let accounts: AccountsResponse = self
            .get_json(&format!("{BUSINESS_API}/accounts"), access_token, &[])
            .await?;

        let Some(account) = accounts.accounts.into_iter().next() else {
            tracing::info!("Google user has no business accounts");
            return Ok(None);
        };

        let locations: LocationsResponse = self
            .get_json(
                &format!("{BUSINESS_API}/{}/locations", account.name),
                access_token,
                &[("readMask", "name,title")],
            )
            .await?;

        let Some(location) = locations.locations.into_iter().next() else {
            tracing::info!(account = %account.name, "Google account has no locations");
            return Ok(None);
        };

        tracing::debug!(
            account = %account.name,
            location = %location.name,
            title = ?location.title,
            "Discovered Google location"
        );

        Ok(Some(ProviderLocation {
            account_ref: account.name,
            location_ref: location.name,
            account_name: account.account_name,
        }))
    }

    #[instrument(skip(self, access_token))]
    async fn fetch_reviews(
        &self,
        access_token: &str,
        account_ref: &str,
        location_ref: &str,
    ) -> IntegrationResult<Vec<RawReview>> {
        let url = format!("{REVIEWS_API}/{account_ref}/{location_ref}/reviews");
        let mut reviews = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_REVIEW_PAGES {
            let mut query = vec![("pageSize", REVIEW_PAGE_SIZE)];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: ReviewsResponse = self.get_json(&url, access_token, &query).await?;
            reviews.extend(page.reviews);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        tracing::debug!(count = reviews.len(), "Fetched Google reviews");
        Ok(reviews)
    }

    #[instrument(skip(self, access_token, text))]
    async fn post_reply(
        &self,
        access_token: &str,
        review_ref: &str,
        text: &str,
    ) -> IntegrationResult<()> {
        let url = format!("{REVIEWS_API}/{review_ref}/reply");
        let body = serde_json::json!({ "comment": text });

        self.send(Retry::Transient, || {
            self.http.put(&url).bearer_auth(access_token).json(&body)
        })
        .await?;
        Ok(())
    }
}

fn check_status(response: Response) -> IntegrationResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::UNAUTHORIZED {
        Err(IntegrationError::Unauthorized { service: SERVICE })
    } else {
        Err(IntegrationError::Upstream {
            service: SERVICE,
            status: status.as_u16(),
        })
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> IntegrationResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| IntegrationError::InvalidResponse {
            service: SERVICE,
            message: e.without_url().to_string(),
        })
}

/// Delay before retry number `attempt + 1`
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(1 << attempt.min(6)))
}
