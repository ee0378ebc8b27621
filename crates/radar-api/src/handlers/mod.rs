//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod account;
pub mod auth;
pub mod billing;
pub mod connections;
pub mod demo;
pub mod google;
pub mod health;
pub mod reviews;
pub mod stats;
pub mod webhooks;
pub mod widget;
