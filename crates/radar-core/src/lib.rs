//! # radar-core
//!
//! Domain layer containing entities, value objects, repository traits and review statistics.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod stats;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    rating_stars, Account, NewAccount, NewConnection, NewReview, PlatformConnection, Review,
    ReviewQuery,
};
pub use error::DomainError;
pub use stats::{MonthlyTrend, RatingDistribution, ReviewStats};
pub use traits::{
    AccountRepository, BillingEventRepository, ConnectionRepository, RepoResult,
    ReviewRepository,
};
pub use value_objects::{AccountId, ConnectionId, IdParseError, Plan, Platform, ReviewId};
