//! Demo data handler

use axum::{extract::State, Json};
use radar_service::dto::SeedResponse;
use radar_service::DemoService;

use crate::extractors::AuthAccount;
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /api/demo/seed
pub async fn seed(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> ApiResult<Json<SeedResponse>> {
    let response = DemoService::new(state.service_context())
        .seed(account.id)
        .await?;
    Ok(Json(response))
}
