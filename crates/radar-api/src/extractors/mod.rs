//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation and typed path ids.

mod auth;
mod path;
mod validated;

pub use auth::AuthAccount;
pub use path::IdPath;
pub use validated::{ValidatedJson, ValidatedQuery};
