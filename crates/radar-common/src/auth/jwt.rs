//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! The same signing key issues bearer tokens and the short-lived OAuth `state`
//! values, distinguished by `token_type`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use radar_core::AccountId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    OauthState,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    /// Get the account ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid account id
    pub fn account_id(&self) -> Result<AccountId, AppError> {
        self.sub.parse::<AccountId>().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Bearer token handed to clients after register or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    oauth_state_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry times (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, oauth_state_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            oauth_state_expiry,
        }
    }

    /// Issue a bearer token for an account
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, account_id: AccountId) -> Result<AccessToken, AppError> {
        let access_token = self.encode_token(account_id, TokenType::Access)?;

        Ok(AccessToken {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Issue the opaque `state` value for an OAuth authorization request
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_oauth_state(&self, account_id: AccountId) -> Result<String, AppError> {
        self.encode_token(account_id, TokenType::OauthState)
    }

    fn encode_token(&self, account_id: AccountId, token_type: TokenType) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::OauthState => self.oauth_state_expiry,
        };

        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate a bearer token and return the account it was issued for
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn validate_access_token(&self, token: &str) -> Result<AccountId, AppError> {
        self.validate(token, TokenType::Access)
    }

    /// Validate an OAuth `state` value and return the account that started the flow
    ///
    /// # Errors
    /// Returns an error if the state is invalid, expired, or not a state token
    pub fn validate_oauth_state(&self, state: &str) -> Result<AccountId, AppError> {
        self.validate(state, TokenType::OauthState)
    }

    fn validate(&self, token: &str, expected: TokenType) -> Result<AccountId, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }

        claims.account_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("oauth_state_expiry", &self.oauth_state_expiry)
            .finish_non_exhaustive()
    }
}
