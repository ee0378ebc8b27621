//! Payment provider webhooks

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use radar_service::dto::StatusResponse;
use radar_service::BillingService;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// Verify and apply a Stripe event; the raw body is needed for the signature
///
/// POST /api/webhooks/stripe
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<StatusResponse>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::MissingSignature)?;

    let response = BillingService::new(state.service_context())
        .handle_webhook(&body, signature)
        .await?;
    Ok(Json(response))
}
