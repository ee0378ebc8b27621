//! Review statistics
//!
//! Pure aggregation over an account's reviews. Reviews without a rating count
//! as zero in averages and are left out of the distribution.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::entities::{rating_stars, Review};

/// Number of calendar months in the trailing trend, including the current one
pub const TREND_MONTHS: u32 = 6;

/// Aggregate statistics for one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub reviews_this_month: i64,
    pub rating_distribution: RatingDistribution,
    /// Oldest month first
    pub monthly_trend: Vec<MonthlyTrend>,
}

/// Review counts per whole-star bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingDistribution([i64; 5]);

impl RatingDistribution {
    /// Count for a star bucket (1-5); other values return 0
    pub fn get(&self, stars: u8) -> i64 {
        match stars {
            1..=5 => self.0[usize::from(stars - 1)],
            _ => 0,
        }
    }

    fn record(&mut self, stars: u8) {
        if (1..=5).contains(&stars) {
            self.0[usize::from(stars - 1)] += 1;
        }
    }

    /// `(stars, count)` pairs from 1 to 5
    pub fn iter(&self) -> impl Iterator<Item = (u8, i64)> + '_ {
        (1u8..=5).zip(self.0.iter().copied())
    }
}

impl Serialize for RatingDistribution {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(5))?;
        for (stars, count) in self.iter() {
            map.serialize_entry(&stars.to_string(), &count)?;
        }
        map.end()
    }
}

/// One calendar month of the trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// e.g. `Mar 2025`
    pub month: String,
    pub count: i64,
    pub average: f64,
}

impl ReviewStats {
    /// Compute statistics relative to `now` (UTC calendar months)
    pub fn compute(reviews: &[Review], now: DateTime<Utc>) -> Self {
        let mut distribution = RatingDistribution::default();
        for review in reviews {
            if review.rating.is_some() {
                distribution.record(rating_stars(review.rating));
            }
        }

        let this_month_start = month_start(now.year(), now.month());
        let reviews_this_month = this_month_start.map_or(0, |start| {
            reviews
                .iter()
                .filter(|r| r.review_date.is_some_and(|d| d >= start))
                .count() as i64
        });

        let monthly_trend = trailing_months(now)
            .into_iter()
            .map(|(start, end)| {
                let in_month: Vec<&Review> = reviews
                    .iter()
                    .filter(|r| r.review_date.is_some_and(|d| d >= start && d < end))
                    .collect();
                MonthlyTrend {
                    month: start.format("%b %Y").to_string(),
                    count: in_month.len() as i64,
                    average: average(in_month.iter().copied()),
                }
            })
            .collect();

        Self {
            total_reviews: reviews.len() as i64,
            average_rating: average(reviews.iter()),
            reviews_this_month,
            rating_distribution: distribution,
            monthly_trend,
        }
    }
}

/// Mean rating rounded to one decimal, unrated reviews as 0, 0 when empty
fn average<'a>(reviews: impl Iterator<Item = &'a Review>) -> f64 {
    let (sum, count) = reviews
        .map(|r| r.rating.filter(|v| v.is_finite()).unwrap_or(0.0))
        .fold((0.0_f64, 0_u32), |(sum, count), rating| (sum + rating, count + 1));

    if count == 0 {
        0.0
    } else {
        round_one_decimal(sum / f64::from(count))
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `[start, end)` bounds of the trailing months, oldest first
fn trailing_months(now: DateTime<Utc>) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let current = now.year() * 12 + now.month0() as i32;
    let bounds = |index: i32| month_start(index.div_euclid(12), index.rem_euclid(12) as u32 + 1);

    (0..TREND_MONTHS as i32)
        .rev()
        .filter_map(|back| {
            let index = current - back;
            Some((bounds(index)?, bounds(index + 1)?))
        })
        .collect()
}
