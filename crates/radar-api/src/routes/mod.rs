//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{
    account, auth, billing, connections, demo, google, health, reviews, stats, webhooks, widget,
};
use crate::state::AppState;

/// Create the main API router (excluding health for separate middleware handling)
///
/// The demo seeding endpoint is only mounted when `demo_enabled` is set.
pub fn create_router(demo_enabled: bool) -> Router<AppState> {
    Router::new().nest("/api", api_routes(demo_enabled))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::readiness_check))
}

fn api_routes(demo_enabled: bool) -> Router<AppState> {
    let router = Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(review_routes())
        .merge(google_routes())
        .merge(connection_routes())
        .merge(billing_routes())
        .route("/widget/:account_id", get(widget::get_widget));

    if demo_enabled {
        router.route("/demo/seed", post(demo::seed))
    } else {
        router
    }
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// Profile routes
fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(account::get_profile).patch(account::update_profile),
    )
}

/// Review and statistics routes
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews/:review_id/reply", post(reviews::reply_to_review))
        .route("/stats", get(stats::get_stats))
}

/// Google integration routes
fn google_routes() -> Router<AppState> {
    Router::new()
        .route("/google/connect", get(google::connect))
        .route("/google/callback", get(google::callback))
        .route("/google/sync", post(google::sync))
}

/// Connection routes
fn connection_routes() -> Router<AppState> {
    Router::new()
        .route("/connections", get(connections::list_connections))
        .route(
            "/connections/:connection_id",
            delete(connections::delete_connection),
        )
}

/// Billing routes
fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/billing/checkout", post(billing::checkout))
        .route("/billing/portal", post(billing::portal))
        .route("/webhooks/stripe", post(webhooks::stripe_webhook))
}
