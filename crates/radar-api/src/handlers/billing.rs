//! Billing handlers
//!
//! Checkout and customer portal sessions.

use axum::{
    extract::{Query, State},
    Json,
};
use radar_service::dto::{CheckoutQuery, UrlResponse};
use radar_service::BillingService;

use crate::extractors::AuthAccount;
use crate::response::ApiResult;
use crate::state::AppState;

/// Start checkout for `?plan=starter|pro`
///
/// POST /api/billing/checkout
pub async fn checkout(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Query(query): Query<CheckoutQuery>,
) -> ApiResult<Json<UrlResponse>> {
    let response = BillingService::new(state.service_context())
        .checkout(&account, &query.plan)
        .await?;
    Ok(Json(response))
}

/// POST /api/billing/portal
pub async fn portal(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> ApiResult<Json<UrlResponse>> {
    let response = BillingService::new(state.service_context())
        .portal(&account)
        .await?;
    Ok(Json(response))
}
