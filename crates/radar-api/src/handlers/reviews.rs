//! Review handlers
//!
//! Endpoints for listing reviews and replying to them.

use axum::{extract::State, Json};
use radar_core::ReviewId;
use radar_service::dto::{ListReviewsQuery, ReplyRequest, ReviewResponse, StatusResponse};
use radar_service::ReviewService;

use crate::extractors::{AuthAccount, IdPath, ValidatedJson, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// List reviews with optional platform/rating filters
///
/// GET /api/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    ValidatedQuery(query): ValidatedQuery<ListReviewsQuery>,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.list(account.id, query).await?;
    Ok(Json(response))
}

/// Reply to a review (paid plans)
///
/// POST /api/reviews/{review_id}/reply
pub async fn reply_to_review(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    IdPath(review_id): IdPath<ReviewId>,
    ValidatedJson(request): ValidatedJson<ReplyRequest>,
) -> ApiResult<Json<StatusResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service.reply(&account, review_id, request).await?;
    Ok(Json(response))
}
