//! HTML email templates for review notifications

use std::fmt::Write;

use radar_core::Review;

use super::mailer::EmailMessage;

const DIGEST_TEXT_LIMIT: usize = 80;

const HEADER: &str = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: linear-gradient(135deg, #1e3a5f 0%, #2563eb 100%); padding: 24px; border-radius: 12px 12px 0 0;">
    <h1 style="color: white; margin: 0; font-size: 24px;">Review<span style="color: #facc15;">Radar</span></h1>
  </div>
  <div style="background: white; padding: 24px; border: 1px solid #e5e7eb; border-top: none; border-radius: 0 0 12px 12px;">"#;

const FOOTER: &str = "\n  </div>\n</div>\n";

const BUTTON_STYLE: &str = "display: inline-block; background: #2563eb; color: white; padding: 12px 24px; border-radius: 8px; text-decoration: none; font-weight: bold;";

const CELL_STYLE: &str = "padding: 8px; border-bottom: 1px solid #e5e7eb;";

/// Alert for a single new review
pub fn new_review_email(to: &str, review: &Review, dashboard_url: &str) -> EmailMessage {
    let stars = review.stars();
    let author = author_of(review);
    let platform = review.platform.display_name();

    let text = review
        .text
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map_or_else(|| "(Geen tekst)".to_string(), escape_html);

    let html = format!(
        r#"{HEADER}
    <h2 style="margin-top: 0;">Nieuwe review ontvangen!</h2>
    <div style="background: #f9fafb; border-radius: 8px; padding: 16px; margin: 16px 0;">
      <p style="margin: 0 0 8px 0;"><strong>{author}</strong> op <strong>{platform}</strong></p>
      <p style="margin: 0 0 8px 0; color: #eab308; font-size: 20px;">{star_bar}</p>
      <p style="margin: 0; color: #4b5563;">{text}</p>
    </div>
    <a href="{url}" style="{BUTTON_STYLE}">Bekijk &amp; Reageer</a>{FOOTER}"#,
        author = escape_html(author),
        star_bar = star_bar(stars),
        url = escape_html(dashboard_url),
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("Nieuwe {platform} review ({stars}★) - {author}"),
        html,
    }
}

/// Tabular summary of several new reviews
pub fn digest_email(to: &str, reviews: &[Review], dashboard_url: &str) -> EmailMessage {
    let count = reviews.len();

    let mut rows = String::new();
    for review in reviews {
        let _ = write!(
            rows,
            r#"
          <tr>
            <td style="{CELL_STYLE}">{platform}</td>
            <td style="{CELL_STYLE} color: #eab308;">{stars}</td>
            <td style="{CELL_STYLE}">{author}</td>
            <td style="{CELL_STYLE}">{text}</td>
          </tr>"#,
            platform = review.platform.display_name(),
            stars = star_bar(review.stars()),
            author = escape_html(author_of(review)),
            text = escape_html(&truncate(review.text.as_deref().unwrap_or(""), DIGEST_TEXT_LIMIT)),
        );
    }

    let html = format!(
        r#"{HEADER}
    <h2 style="margin-top: 0;">Dagelijks overzicht: {count} nieuwe review(s)</h2>
    <table style="width: 100%; border-collapse: collapse;">
      <thead>
        <tr style="background: #f3f4f6;">
          <th style="padding: 8px; text-align: left;">Platform</th>
          <th style="padding: 8px; text-align: left;">Rating</th>
          <th style="padding: 8px; text-align: left;">Auteur</th>
          <th style="padding: 8px; text-align: left;">Review</th>
        </tr>
      </thead>
      <tbody>{rows}
      </tbody>
    </table>
    <a href="{url}" style="{BUTTON_STYLE} margin-top: 16px;">Bekijk alle reviews</a>{FOOTER}"#,
        url = escape_html(dashboard_url),
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("ReviewRadar - {count} nieuwe review(s) vandaag"),
        html,
    }
}

fn author_of(review: &Review) -> &str {
    review.author_name.as_deref().unwrap_or("Anoniem")
}

/// Filled and empty stars, e.g. `★★★☆☆`
fn star_bar(stars: u8) -> String {
    let filled = usize::from(stars.min(5));
    "★".repeat(filled) + &"☆".repeat(5 - filled)
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
