//! Domain entities - core business objects

mod account;
mod connection;
mod review;

pub use account::{Account, NewAccount};
pub use connection::{NewConnection, PlatformConnection};
pub use review::{rating_stars, NewReview, Review, ReviewQuery};
