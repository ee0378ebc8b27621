//! Server setup and initialization
//!
//! Provides the application builder, dependency wiring and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use radar_common::{AppConfig, AppError, JwtService};
use radar_db::{
    create_pool, run_migrations, PgAccountRepository, PgBillingEventRepository,
    PgConnectionRepository, PgReviewRepository,
};
use radar_integrations::{mailer_from_config, GoogleClient, StripeGateway, WebhookVerifier};
use radar_service::{ServiceContext, ServiceContextBuilder, ServiceSettings};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the Axum application with all routes and middleware, without rate limiting
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router(config.demo_seed_enabled).merge(health_routes());
    apply_middleware(router, &config.cors, config.app.is_production()).with_state(state)
}

/// Build the production application; health routes bypass the rate limiter
pub fn create_rate_limited_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit(create_router(config.demo_seed_enabled), &config.rate_limit)?;
    let router = api.merge(health_routes());
    Ok(apply_middleware(router, &config.cors, config.app.is_production()).with_state(state))
}

/// Connect to PostgreSQL, apply migrations and wire every dependency
pub async fn create_service_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.oauth_state_expiry,
    ));

    let review_provider = GoogleClient::new(config.google.clone(), &config.http)
        .map_err(|e| AppError::Config(e.to_string()))?;
    let mailer = mailer_from_config(&config.smtp).map_err(|e| AppError::Config(e.to_string()))?;

    ServiceContextBuilder::new()
        .account_repo(Arc::new(PgAccountRepository::new(pool.clone())))
        .connection_repo(Arc::new(PgConnectionRepository::new(pool.clone())))
        .review_repo(Arc::new(PgReviewRepository::new(pool.clone())))
        .billing_event_repo(Arc::new(PgBillingEventRepository::new(pool.clone())))
        .pool(pool)
        .review_provider(Arc::new(review_provider))
        .billing_gateway(Arc::new(StripeGateway::new(&config.stripe.secret_key)))
        .webhook_verifier(WebhookVerifier::new(config.stripe.webhook_secret.clone()))
        .mailer(mailer)
        .jwt_service(jwt_service)
        .settings(ServiceSettings::from_config(config))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = create_service_context(&config).await?;
    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
///
/// Peer addresses are attached to requests for the rate limiter.
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_rate_limited_app(state)?;
    run_server(app, &addr).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
