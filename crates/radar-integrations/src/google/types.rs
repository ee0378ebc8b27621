//! Typed Google Business Profile payloads

use std::fmt;

use serde::Deserialize;

/// OAuth token endpoint response
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Credentials obtained from the authorization code exchange
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthTokens {
    pub access_token: String,
    /// Only returned when the user granted offline access
    pub refresh_token: Option<String>,
}

impl fmt::Debug for OAuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokens")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<GoogleAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleAccount {
    /// Resource name, `accounts/{id}`
    pub name: String,
    #[serde(default)]
    pub account_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<GoogleLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleLocation {
    /// Resource name, `locations/{id}`
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<RawReview>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// The business account and location whose reviews are synced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderLocation {
    pub account_ref: String,
    pub location_ref: String,
    pub account_name: Option<String>,
}

/// Review as returned by the v4 reviews endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    /// Full resource name, `accounts/{a}/locations/{l}/reviews/{r}`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub review_id: Option<String>,
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
    #[serde(default)]
    pub star_rating: Option<StarRating>,
    #[serde(default)]
    pub comment: Option<String>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub review_reply: Option<ReviewReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reviewer {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewReply {
    #[serde(default)]
    pub comment: Option<String>,
}

/// Star rating enum used by the reviews API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarRating {
    One,
    Two,
    Three,
    Four,
    Five,
    #[serde(other)]
    Unspecified,
}

impl StarRating {
    /// Numeric value, `None` for unspecified ratings
    pub fn value(self) -> Option<f64> {
        match self {
            Self::One => Some(1.0),
            Self::Two => Some(2.0),
            Self::Three => Some(3.0),
            Self::Four => Some(4.0),
            Self::Five => Some(5.0),
            Self::Unspecified => None,
        }
    }
}
