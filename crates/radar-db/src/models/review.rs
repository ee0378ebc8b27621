//! Review database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: i64,
    pub account_id: i64,
    pub platform: String,
    pub external_id: Option<String>,
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
    pub reply_pending_upstream: bool,
    pub review_date: Option<DateTime<Utc>>,
    pub fetched_at: DateTime<Utc>,
    pub notified: bool,
}
