//! Google Business Profile handlers
//!
//! OAuth connect and callback, and manual review sync.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use radar_service::dto::{OAuthCallbackQuery, SyncResponse, UrlResponse};
use radar_service::GoogleService;

use crate::extractors::AuthAccount;
use crate::response::ApiResult;
use crate::state::AppState;

/// Consent screen URL for the caller
///
/// GET /api/google/connect
pub async fn connect(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> ApiResult<Json<UrlResponse>> {
    let response = GoogleService::new(state.service_context()).connect_url(account.id)?;
    Ok(Json(response))
}

/// OAuth redirect target; sends the browser back to the dashboard
///
/// GET /api/google/callback
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> ApiResult<Redirect> {
    let url = GoogleService::new(state.service_context())
        .handle_callback(query)
        .await?;
    Ok(Redirect::temporary(&url))
}

/// Fetch new reviews from Google
///
/// POST /api/google/sync
pub async fn sync(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> ApiResult<Json<SyncResponse>> {
    let response = GoogleService::new(state.service_context())
        .sync(&account)
        .await?;
    Ok(Json(response))
}
