//! Authentication service
//!
//! Handles account registration, login and bearer token resolution.

use radar_common::auth::{hash_password, verify_password};
use radar_common::AppError;
use radar_core::{Account, DomainError, NewAccount};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account on the free plan
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        if self.ctx.account_repo().find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let account = self
            .ctx
            .account_repo()
            .create(
                &NewAccount {
                    email,
                    business_name: request.business_name.trim().to_string(),
                },
                &password_hash,
            )
            .await?;

        info!(account_id = %account.id, "Account registered");

        self.issue_token(&account)
    }

    /// Login with email and password
    ///
    /// Unknown emails and wrong passwords produce the same error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let email = normalize_email(&request.email);

        let account = self
            .ctx
            .account_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: account not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .account_repo()
            .get_password_hash(account.id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(account_id = %account.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(account_id = %account.id, "Account logged in");

        self.issue_token(&account)
    }

    /// Resolve a bearer token to its account
    ///
    /// Any failure, including a deleted account, is reported as an invalid token.
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Account> {
        let account_id = self.ctx.jwt_service().validate_access_token(token)?;

        self.ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account_id, "Token for unknown account");
                ServiceError::App(AppError::InvalidToken)
            })
    }

    fn issue_token(&self, account: &Account) -> ServiceResult<AuthResponse> {
        let token = self.ctx.jwt_service().issue_access_token(account.id)?;
        Ok(token.into())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
