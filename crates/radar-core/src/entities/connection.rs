//! Platform connection entity - stored credentials for one review platform

use chrono::{DateTime, Utc};
use std::fmt;

use crate::value_objects::{AccountId, ConnectionId, Platform};

/// OAuth credentials linking an account to a review platform
///
/// At most one connection exists per (account, platform).
#[derive(Clone, PartialEq, Eq)]
pub struct PlatformConnection {
    pub id: ConnectionId,
    pub account_id: AccountId,
    pub platform: Platform,
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Provider account resource, e.g. `accounts/123`
    pub account_ref: Option<String>,
    /// Provider location resource, e.g. `locations/456`
    pub location_ref: Option<String>,
    pub account_name: Option<String>,
    pub connected_at: DateTime<Utc>,
}

impl PlatformConnection {
    /// Account and location refs needed to address reviews upstream
    pub fn location(&self) -> Option<(&str, &str)> {
        match (&self.account_ref, &self.location_ref) {
            (Some(account), Some(location)) => Some((account.as_str(), location.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for PlatformConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConnection")
            .field("id", &self.id)
            .field("account_id", &self.account_id)
            .field("platform", &self.platform)
            .field("account_ref", &self.account_ref)
            .field("location_ref", &self.location_ref)
            .field("account_name", &self.account_name)
            .field("connected_at", &self.connected_at)
            .finish_non_exhaustive()
    }
}

/// Data for creating or replacing a connection
#[derive(Clone)]
pub struct NewConnection {
    pub account_id: AccountId,
    pub platform: Platform,
    pub access_token: String,
    /// `None` keeps a previously stored refresh token
    pub refresh_token: Option<String>,
}

impl fmt::Debug for NewConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewConnection")
            .field("account_id", &self.account_id)
            .field("platform", &self.platform)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}
