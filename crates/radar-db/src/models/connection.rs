//! Platform connection database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for platform_connections table
#[derive(Clone, FromRow)]
pub struct ConnectionModel {
    pub id: i64,
    pub account_id: i64,
    pub platform: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub account_ref: Option<String>,
    pub location_ref: Option<String>,
    pub account_name: Option<String>,
    pub connected_at: DateTime<Utc>,
}
