//! Daily digest runner
//!
//! Sends each account with notifications enabled one email covering the
//! reviews fetched in the last 24 hours that were not notified yet. Meant to
//! be invoked once a day by an external scheduler.

use chrono::Utc;
use radar_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use radar_service::NotificationService;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Digest run failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let context = radar_api::create_service_context(&config).await?;
    let summary = NotificationService::new(&context)
        .run_daily_digest(Utc::now())
        .await?;

    info!(
        accounts = summary.accounts_checked,
        emails = summary.emails_sent,
        "Digest run complete"
    );
    Ok(())
}
