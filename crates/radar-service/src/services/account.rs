//! Account service
//!
//! Handles profile reads and updates for the authenticated account.

use radar_core::Account;
use tracing::{info, instrument};

use crate::dto::{ProfileResponse, StatusResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile of the authenticated account
    pub fn profile(&self, account: &Account) -> ProfileResponse {
        ProfileResponse::from(account)
    }

    /// Update business name and/or notification preference
    ///
    /// Plan and billing columns are never written here.
    #[instrument(skip(self, account, request), fields(account_id = %account.id))]
    pub async fn update_profile(
        &self,
        account: &Account,
        request: UpdateProfileRequest,
    ) -> ServiceResult<StatusResponse> {
        let business_name = match request.business_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(ServiceError::validation("Business name must not be blank"));
                }
                Some(name).filter(|n| *n != account.business_name)
            }
            None => None,
        };

        let email_notifications = request
            .email_notifications
            .filter(|enabled| *enabled != account.email_notifications);

        if business_name.is_none() && email_notifications.is_none() {
            return Ok(StatusResponse::ok());
        }

        self.ctx
            .account_repo()
            .update_profile(account.id, business_name.as_deref(), email_notifications)
            .await?;
        info!("Profile updated");

        Ok(StatusResponse::ok())
    }
}
