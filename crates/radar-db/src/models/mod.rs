//! Database models
//!
//! Row structs mirroring the tables; converted into domain entities by `mappers`.

mod account;
mod connection;
mod review;

pub use account::AccountModel;
pub use connection::ConnectionModel;
pub use review::ReviewModel;
