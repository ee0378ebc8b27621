//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CheckoutQuery, ListReviewsQuery, LoginRequest, OAuthCallbackQuery, RegisterRequest,
    ReplyRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, ConnectionResponse, HealthChecks, HealthResponse, ProfileResponse,
    ReadinessResponse, ReviewResponse, SeedResponse, StatsResponse, StatusResponse, SyncResponse,
    UrlResponse, WidgetReviewResponse,
};
