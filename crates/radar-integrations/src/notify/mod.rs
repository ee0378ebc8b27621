//! Review notification email

mod mailer;
mod templates;

pub use mailer::{mailer_from_config, Delivery, EmailMessage, LogMailer, Mailer, SmtpMailer};
pub use templates::{digest_email, new_review_email};
