//! # radar-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AccountService, AuthService, BillingService, ConnectionService, DemoService, DigestSummary,
    GoogleService, HealthService, NotificationService, ReviewService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, StatsService,
    WidgetService,
};
