//! Model to entity mappers
//!
//! Rows carry plan and platform as text, so conversions are fallible: a value
//! the domain does not know is reported as a database error.

mod account;
mod connection;
mod review;

pub use review::ReviewInsert;

use radar_core::DomainError;

fn corrupt(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unexpected {column} value in row: {value}"))
}
