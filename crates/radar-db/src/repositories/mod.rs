//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in radar-core.
//! Each repository handles database operations for a specific domain entity.

mod account;
mod billing_event;
mod connection;
mod error;
mod review;

pub use account::PgAccountRepository;
pub use billing_event::PgBillingEventRepository;
pub use connection::PgConnectionRepository;
pub use review::PgReviewRepository;
