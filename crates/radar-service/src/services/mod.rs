//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` and implements one area
//! of the API: accounts, reviews, provider sync, billing and notifications.

pub mod account;
pub mod auth;
pub mod billing;
pub mod connection;
pub mod context;
pub mod demo;
pub mod error;
pub mod google;
pub mod health;
pub mod notification;
pub mod review;
pub mod stats;
pub mod widget;

// Re-export all services for convenience
pub use account::AccountService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use connection::ConnectionService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use demo::DemoService;
pub use error::{ServiceError, ServiceResult};
pub use google::GoogleService;
pub use health::HealthService;
pub use notification::{DigestSummary, NotificationService};
pub use review::ReviewService;
pub use stats::StatsService;
pub use widget::WidgetService;
