//! Daily digest tests
//!
//! The digest runs outside the HTTP server, so these call the service layer
//! directly on the test server's context.

use chrono::{Duration, Utc};
use integration_tests::{fixtures::register_account, TestServer};
use radar_core::{AccountId, NewReview, Platform};
use radar_service::NotificationService;

fn review(text: &str) -> NewReview {
    NewReview {
        platform: Platform::Google,
        external_id: None,
        author_name: Some("Pieter".to_string()),
        rating: Some(4.0),
        text: Some(text.to_string()),
        reply: None,
        review_date: Some(Utc::now()),
    }
}

#[tokio::test]
async fn test_digest_sends_once_per_account() {
    let server = TestServer::start().await.unwrap();
    let account = register_account(&server).await.unwrap();
    let account_id = AccountId::new(account.id);
    server
        .store
        .add_reviews(account_id, &[review("Lekker"), review("Vriendelijk")])
        .await;

    let notifications = NotificationService::new(&server.context);
    let summary = notifications.run_daily_digest(Utc::now()).await.unwrap();
    assert_eq!(summary.accounts_checked, 1);
    assert_eq!(summary.emails_sent, 1);
    assert_eq!(summary.reviews_included, 2);

    let sent = server.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, account.email);
    assert!(sent[0].subject.contains("2 nieuwe review(s)"));
    assert!(server
        .store
        .reviews(account_id)
        .await
        .iter()
        .all(|r| r.notified));

    let again = notifications.run_daily_digest(Utc::now()).await.unwrap();
    assert_eq!(again.emails_sent, 0);
    assert_eq!(server.mailer.sent().await.len(), 1);
}

#[tokio::test]
async fn test_digest_skips_old_reviews() {
    let server = TestServer::start().await.unwrap();
    let account = register_account(&server).await.unwrap();
    server
        .store
        .add_reviews(AccountId::new(account.id), &[review("Oud")])
        .await;

    // Run as if two days have passed since the fetch
    let summary = NotificationService::new(&server.context)
        .run_daily_digest(Utc::now() + Duration::days(2))
        .await
        .unwrap();
    assert_eq!(summary.emails_sent, 0);
    assert!(server.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn test_digest_failure_leaves_reviews_pending() {
    let server = TestServer::start().await.unwrap();
    let account = register_account(&server).await.unwrap();
    let account_id = AccountId::new(account.id);
    server.store.add_reviews(account_id, &[review("Prima")]).await;
    server.mailer.fail(true);

    let summary = NotificationService::new(&server.context)
        .run_daily_digest(Utc::now())
        .await
        .unwrap();
    assert_eq!(summary.emails_sent, 0);
    assert!(server
        .store
        .reviews(account_id)
        .await
        .iter()
        .all(|r| !r.notified));
}

#[tokio::test]
async fn test_logged_only_mail_leaves_reviews_pending() {
    let server = TestServer::start().await.unwrap();
    let account = register_account(&server).await.unwrap();
    let account_id = AccountId::new(account.id);
    let reviews = server.store.add_reviews(account_id, &[review("Top")]).await;
    server.mailer.log_only(true);

    let notifications = NotificationService::new(&server.context);
    let stored = server.store.account(account_id).await.unwrap();
    assert_eq!(notifications.notify_new_reviews(&stored, &reviews).await, 0);

    let summary = notifications.run_daily_digest(Utc::now()).await.unwrap();
    assert_eq!(summary.emails_sent, 0);
    assert!(server
        .store
        .reviews(account_id)
        .await
        .iter()
        .all(|r| !r.notified));

    // Once SMTP is available the digest still picks them up
    server.mailer.log_only(false);
    let summary = notifications.run_daily_digest(Utc::now()).await.unwrap();
    assert_eq!(summary.emails_sent, 1);
    assert_eq!(summary.reviews_included, 1);
}
