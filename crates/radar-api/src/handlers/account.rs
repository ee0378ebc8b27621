//! Profile handlers

use axum::{extract::State, Json};
use radar_service::dto::{ProfileResponse, StatusResponse, UpdateProfileRequest};
use radar_service::AccountService;

use crate::extractors::{AuthAccount, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/me
pub async fn get_profile(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Json<ProfileResponse> {
    Json(AccountService::new(state.service_context()).profile(&account))
}

/// PATCH /api/me
pub async fn update_profile(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.update_profile(&account, request).await?;
    Ok(Json(response))
}
