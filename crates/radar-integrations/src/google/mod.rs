//! Google Business Profile integration

mod client;
mod normalize;
mod types;

pub use client::{GoogleClient, ReviewProvider, AUTH_URL, SCOPE};
pub use normalize::{normalize_review, review_resource_name, ANONYMOUS_AUTHOR};
pub use types::{OAuthTokens, ProviderLocation, RawReview, ReviewReply, Reviewer, StarRating};
