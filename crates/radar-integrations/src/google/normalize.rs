//! Conversion of provider reviews into insertable rows

use chrono::{DateTime, Utc};
use radar_core::{NewReview, Platform};

use super::types::RawReview;

/// Author name used when the reviewer is anonymous
pub const ANONYMOUS_AUTHOR: &str = "Anoniem";

/// Map a Google review onto the stored review fields
pub fn normalize_review(raw: &RawReview) -> NewReview {
    let author_name = raw
        .reviewer
        .as_ref()
        .and_then(|r| r.display_name.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());

    NewReview {
        platform: Platform::Google,
        external_id: raw.review_id.clone().or_else(|| raw.name.clone()),
        author_name: Some(author_name),
        rating: raw.star_rating.and_then(super::types::StarRating::value),
        text: raw.comment.clone(),
        reply: raw.review_reply.as_ref().and_then(|r| r.comment.clone()),
        review_date: raw.create_time.as_deref().and_then(parse_timestamp),
    }
}

/// Resource name used to address a review when replying
///
/// External ids may already be full resource names; bare review ids are
/// expanded using the connection's account and location.
pub fn review_resource_name(account_ref: &str, location_ref: &str, external_id: &str) -> String {
    if external_id.starts_with("accounts/") {
        external_id.to_string()
    } else {
        format!("{account_ref}/{location_ref}/reviews/{external_id}")
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(value, error = %e, "Ignoring unparseable review timestamp");
            None
        }
    }
}
