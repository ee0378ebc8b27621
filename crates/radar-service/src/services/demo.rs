//! Demo data seeding
//!
//! Fills an account with synthetic reviews so the dashboard has something to
//! show. Only mounted outside production.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use radar_core::{AccountId, NewReview, Platform, ReviewId};
use tracing::{info, instrument, warn};

use crate::dto::SeedResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reviews created per seed call
pub const DEMO_REVIEW_COUNT: usize = 20;

/// Oldest generated review, in days before now
pub const DEMO_MAX_AGE_DAYS: i64 = 180;

const RATINGS: [u8; 5] = [5, 4, 3, 2, 1];
const RATING_WEIGHTS: [u32; 5] = [40, 30, 15, 10, 5];

const PLATFORMS: [Platform; 3] = [Platform::Google, Platform::Facebook, Platform::Tripadvisor];

const AUTHORS: [&str; 15] = [
    "Jan de Vries",
    "Maria Jansen",
    "Pieter Bakker",
    "Fatima El Amrani",
    "Sophie van Dijk",
    "Ahmed Hassan",
    "Emma de Groot",
    "Thomas Visser",
    "Lisa Mulder",
    "Mohammed Youssef",
    "Anna Smit",
    "David Cohen",
    "Karin Bos",
    "Yusuf Demir",
    "Charlotte Brouwer",
];

const POSITIVE: [&str; 6] = [
    "Geweldige service! Zeker een aanrader.",
    "Top kwaliteit, ik kom zeker terug.",
    "Heel vriendelijk personeel, fijne ervaring.",
    "Beste in de buurt, altijd consistent goed.",
    "Precies wat ik zocht, heel tevreden!",
    "Snelle service en goede prijs-kwaliteit verhouding.",
];

const NEUTRAL: [&str; 3] = [
    "Was oké, niets bijzonders.",
    "Gemiddeld, kan beter maar ook slechter.",
    "Redelijke ervaring, niet slecht.",
];

const NEGATIVE: [&str; 2] = [
    "Moest lang wachten, dat kan beter.",
    "Niet helemaal wat ik verwachtte.",
];

/// Generate `count` synthetic reviews dated within the trailing window
pub fn demo_reviews<R: Rng + ?Sized>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<NewReview> {
    let Ok(weights) = WeightedIndex::new(RATING_WEIGHTS) else {
        return Vec::new();
    };

    (0..count)
        .map(|_| {
            let rating = RATINGS[weights.sample(rng)];
            let texts: &[&str] = match rating {
                4..=5 => &POSITIVE,
                3 => &NEUTRAL,
                _ => &NEGATIVE,
            };

            NewReview {
                platform: PLATFORMS.choose(rng).copied().unwrap_or(Platform::Google),
                external_id: None,
                author_name: AUTHORS.choose(rng).map(|s| (*s).to_string()),
                rating: Some(f64::from(rating)),
                text: texts.choose(rng).map(|s| (*s).to_string()),
                reply: None,
                review_date: Some(now - Duration::days(rng.gen_range(0..=DEMO_MAX_AGE_DAYS))),
            }
        })
        .collect()
}

/// Demo seeding service
pub struct DemoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DemoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn seed(&self, account_id: AccountId) -> ServiceResult<SeedResponse> {
        let reviews = demo_reviews(&mut rand::thread_rng(), DEMO_REVIEW_COUNT, Utc::now());

        let inserted = self
            .ctx
            .review_repo()
            .insert_new(account_id, &reviews)
            .await?;

        // Synthetic rows never go out in a digest
        let ids: Vec<ReviewId> = inserted.iter().map(|r| r.id).collect();
        if let Err(e) = self.ctx.review_repo().mark_notified(account_id, &ids).await {
            warn!(error = %e, "Failed to flag demo reviews as notified");
        }

        info!(seeded = inserted.len(), "Demo reviews seeded");
        Ok(SeedResponse {
            seeded: inserted.len(),
        })
    }
}
