//! Connection service
//!
//! Lists and removes the account's platform connections.

use radar_core::{AccountId, ConnectionId, DomainError};
use tracing::{info, instrument};

use crate::dto::{ConnectionResponse, StatusResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Connection service
pub struct ConnectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConnectionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, account_id: AccountId) -> ServiceResult<Vec<ConnectionResponse>> {
        let connections = self.ctx.connection_repo().list_by_account(account_id).await?;
        Ok(connections.iter().map(ConnectionResponse::from).collect())
    }

    /// Remove a connection; stored reviews are kept
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        account_id: AccountId,
        connection_id: ConnectionId,
    ) -> ServiceResult<StatusResponse> {
        if !self
            .ctx
            .connection_repo()
            .delete(account_id, connection_id)
            .await?
        {
            return Err(DomainError::ConnectionNotFound(connection_id).into());
        }

        info!("Connection removed");
        Ok(StatusResponse::ok())
    }
}
