//! Service context - dependency container for services
//!
//! Holds all repositories, integration clients and settings needed by services.

use std::sync::Arc;

use radar_common::auth::JwtService;
use radar_common::AppConfig;
use radar_core::traits::{
    AccountRepository, BillingEventRepository, ConnectionRepository, ReviewRepository,
};
use radar_core::Plan;
use radar_db::PgPool;
use radar_integrations::{BillingGateway, Mailer, ReviewProvider, WebhookVerifier};

use super::error::{ServiceError, ServiceResult};

/// Non-secret settings the services need at request time
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Dashboard base URL without trailing slash
    pub frontend_url: String,
    pub starter_price_id: String,
    pub pro_price_id: String,
    pub trial_days: u32,
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            frontend_url: config.frontend_url.clone(),
            starter_price_id: config.stripe.starter_price_id.clone(),
            pro_price_id: config.stripe.pro_price_id.clone(),
            trial_days: config.stripe.trial_days,
        }
    }

    /// Dashboard page, optionally with a query string
    pub fn dashboard_url(&self, query: Option<&str>) -> String {
        match query {
            Some(q) => format!("{}/dashboard.html?{q}", self.frontend_url),
            None => format!("{}/dashboard.html", self.frontend_url),
        }
    }

    /// Price for a purchasable plan
    pub fn price_id(&self, plan: Plan) -> Option<&str> {
        match plan {
            Plan::Free => None,
            Plan::Starter => Some(&self.starter_price_id),
            Plan::Pro => Some(&self.pro_price_id),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL in production, in-memory in tests)
/// - The review provider, billing gateway and mailer
/// - JWT service for bearer tokens and OAuth state
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running on non-SQL repositories
    pool: Option<PgPool>,

    // Repositories
    account_repo: Arc<dyn AccountRepository>,
    connection_repo: Arc<dyn ConnectionRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    billing_event_repo: Arc<dyn BillingEventRepository>,

    // Integrations
    review_provider: Arc<dyn ReviewProvider>,
    billing_gateway: Arc<dyn BillingGateway>,
    webhook_verifier: WebhookVerifier,
    mailer: Arc<dyn Mailer>,

    jwt_service: Arc<JwtService>,
    settings: Arc<ServiceSettings>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn account_repo(&self) -> &dyn AccountRepository {
        self.account_repo.as_ref()
    }

    pub fn connection_repo(&self) -> &dyn ConnectionRepository {
        self.connection_repo.as_ref()
    }

    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    pub fn billing_event_repo(&self) -> &dyn BillingEventRepository {
        self.billing_event_repo.as_ref()
    }

    // === Integrations ===

    pub fn review_provider(&self) -> &dyn ReviewProvider {
        self.review_provider.as_ref()
    }

    pub fn billing_gateway(&self) -> &dyn BillingGateway {
        self.billing_gateway.as_ref()
    }

    pub fn webhook_verifier(&self) -> &WebhookVerifier {
        &self.webhook_verifier
    }

    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        self.settings.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("integrations", &"...")
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    account_repo: Option<Arc<dyn AccountRepository>>,
    connection_repo: Option<Arc<dyn ConnectionRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    billing_event_repo: Option<Arc<dyn BillingEventRepository>>,
    review_provider: Option<Arc<dyn ReviewProvider>>,
    billing_gateway: Option<Arc<dyn BillingGateway>>,
    webhook_verifier: Option<WebhookVerifier>,
    mailer: Option<Arc<dyn Mailer>>,
    jwt_service: Option<Arc<JwtService>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn account_repo(mut self, repo: Arc<dyn AccountRepository>) -> Self {
        self.account_repo = Some(repo);
        self
    }

    pub fn connection_repo(mut self, repo: Arc<dyn ConnectionRepository>) -> Self {
        self.connection_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn billing_event_repo(mut self, repo: Arc<dyn BillingEventRepository>) -> Self {
        self.billing_event_repo = Some(repo);
        self
    }

    pub fn review_provider(mut self, provider: Arc<dyn ReviewProvider>) -> Self {
        self.review_provider = Some(provider);
        self
    }

    pub fn billing_gateway(mut self, gateway: Arc<dyn BillingGateway>) -> Self {
        self.billing_gateway = Some(gateway);
        self
    }

    pub fn webhook_verifier(mut self, verifier: WebhookVerifier) -> Self {
        self.webhook_verifier = Some(verifier);
        self
    }

    pub fn mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            pool: self.pool,
            account_repo: required(self.account_repo, "account_repo")?,
            connection_repo: required(self.connection_repo, "connection_repo")?,
            review_repo: required(self.review_repo, "review_repo")?,
            billing_event_repo: required(self.billing_event_repo, "billing_event_repo")?,
            review_provider: required(self.review_provider, "review_provider")?,
            billing_gateway: required(self.billing_gateway, "billing_gateway")?,
            webhook_verifier: required(self.webhook_verifier, "webhook_verifier")?,
            mailer: required(self.mailer, "mailer")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            settings: Arc::new(required(self.settings, "settings")?),
        })
    }
}
