//! Platform connection handlers

use axum::{extract::State, Json};
use radar_core::ConnectionId;
use radar_service::dto::{ConnectionResponse, StatusResponse};
use radar_service::ConnectionService;

use crate::extractors::{AuthAccount, IdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/connections
pub async fn list_connections(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> ApiResult<Json<Vec<ConnectionResponse>>> {
    let response = ConnectionService::new(state.service_context())
        .list(account.id)
        .await?;
    Ok(Json(response))
}

/// DELETE /api/connections/{connection_id}
pub async fn delete_connection(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    IdPath(connection_id): IdPath<ConnectionId>,
) -> ApiResult<Json<StatusResponse>> {
    let response = ConnectionService::new(state.service_context())
        .delete(account.id, connection_id)
        .await?;
    Ok(Json(response))
}
