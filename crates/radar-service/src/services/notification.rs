//! Notification service
//!
//! New-review alerts and daily digests. Email delivery is best-effort:
//! failures are logged and the affected reviews stay un-notified so the next
//! digest picks them up.

use chrono::{DateTime, Duration, Utc};
use radar_core::{Account, Review, ReviewId};
use radar_integrations::{digest_email, new_review_email, EmailMessage};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Window of fetched reviews covered by a digest
pub const DIGEST_WINDOW_HOURS: i64 = 24;

/// Outcome of a digest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DigestSummary {
    pub accounts_checked: usize,
    pub emails_sent: usize,
    pub reviews_included: usize,
}

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a new-review alert; returns whether an email went out
    pub async fn notify_new_review(&self, account: &Account, review: &Review) -> bool {
        if !account.wants_notifications() {
            return false;
        }

        let dashboard = self.ctx.settings().dashboard_url(None);
        let message = new_review_email(&account.email, review, &dashboard);
        self.deliver(&message).await
    }

    /// Send a digest of several reviews; returns whether an email went out
    pub async fn send_daily_digest(&self, account: &Account, reviews: &[Review]) -> bool {
        if reviews.is_empty() || !account.wants_notifications() {
            return false;
        }

        let dashboard = self.ctx.settings().dashboard_url(None);
        let message = digest_email(&account.email, reviews, &dashboard);
        self.deliver(&message).await
    }

    /// Alert for each freshly synced review and flag the ones that were sent
    #[instrument(skip_all, fields(account_id = %account.id, count = reviews.len()))]
    pub async fn notify_new_reviews(&self, account: &Account, reviews: &[Review]) -> usize {
        let mut sent: Vec<ReviewId> = Vec::new();
        for review in reviews {
            if self.notify_new_review(account, review).await {
                sent.push(review.id);
            }
        }

        if !sent.is_empty() {
            if let Err(e) = self.ctx.review_repo().mark_notified(account.id, &sent).await {
                warn!(error = %e, "Failed to flag notified reviews");
            }
        }

        sent.len()
    }

    /// Send every opted-in account a digest of un-notified reviews fetched
    /// in the last day
    #[instrument(skip(self))]
    pub async fn run_daily_digest(&self, now: DateTime<Utc>) -> ServiceResult<DigestSummary> {
        let since = now - Duration::hours(DIGEST_WINDOW_HOURS);
        let accounts = self.ctx.account_repo().list_notifiable().await?;
        let mut summary = DigestSummary::default();

        for account in &accounts {
            summary.accounts_checked += 1;

            let reviews = self
                .ctx
                .review_repo()
                .list_unnotified_since(account.id, since)
                .await?;

            if !self.send_daily_digest(account, &reviews).await {
                continue;
            }

            let ids: Vec<ReviewId> = reviews.iter().map(|r| r.id).collect();
            self.ctx.review_repo().mark_notified(account.id, &ids).await?;

            summary.emails_sent += 1;
            summary.reviews_included += reviews.len();
        }

        info!(
            accounts = summary.accounts_checked,
            emails = summary.emails_sent,
            reviews = summary.reviews_included,
            "Daily digest finished"
        );
        Ok(summary)
    }

    /// Whether the message actually left; logged-only mail does not count
    async fn deliver(&self, message: &EmailMessage) -> bool {
        match self.ctx.mailer().send(message).await {
            Ok(delivery) => delivery.is_sent(),
            Err(e) => {
                warn!(error = %e, subject = %message.subject, "Email delivery failed");
                false
            }
        }
    }
}
