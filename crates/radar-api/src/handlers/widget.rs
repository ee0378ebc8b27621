//! Public widget handler

use axum::{extract::State, Json};
use radar_core::AccountId;
use radar_service::dto::WidgetReviewResponse;
use radar_service::WidgetService;

use crate::extractors::IdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Top reviews for embedding on a customer site; no authentication
///
/// GET /api/widget/{account_id}
pub async fn get_widget(
    State(state): State<AppState>,
    IdPath(account_id): IdPath<AccountId>,
) -> ApiResult<Json<Vec<WidgetReviewResponse>>> {
    let response = WidgetService::new(state.service_context())
        .widget(account_id)
        .await?;
    Ok(Json(response))
}
