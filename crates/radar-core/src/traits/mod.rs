//! Repository traits

mod repositories;

pub use repositories::{
    AccountRepository, BillingEventRepository, ConnectionRepository, RepoResult,
    ReviewRepository,
};
