//! Integration test utilities for ReviewRadar
//!
//! Runs the real axum application over an in-memory service context: memory
//! repositories, a scripted review provider, a recording billing gateway and
//! a recording mailer.

pub mod fakes;
pub mod fixtures;
pub mod helpers;
pub mod memory;

pub use fakes::*;
pub use fixtures::*;
pub use helpers::*;
pub use memory::MemoryStore;
