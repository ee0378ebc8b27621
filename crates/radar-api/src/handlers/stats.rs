//! Statistics handler

use axum::{extract::State, Json};
use radar_service::dto::StatsResponse;
use radar_service::StatsService;

use crate::extractors::AuthAccount;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/stats
pub async fn get_stats(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> ApiResult<Json<StatsResponse>> {
    let response = StatsService::new(state.service_context())
        .stats(account.id)
        .await?;
    Ok(Json(response))
}
