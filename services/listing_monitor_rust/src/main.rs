use anyhow::{bail, Result};
use clap::Parser;
use dotenv::dotenv;
use listing_monitor_rust::{Cli, Config, ListingMonitor};
use seatwatch_rust_core::clients::{GametimeClient, TwilioClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Gametime price monitor");

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let criteria = cli.criteria()?;

    // Clients
    let gametime = Arc::new(GametimeClient::with_base_url(
        &config.gametime_api_base_url,
        config.http_timeout,
    ));
    let twilio = Arc::new(TwilioClient::with_base_url(
        &config.twilio_api_base_url,
        config.twilio_account_sid.clone(),
        config.twilio_auth_token.clone(),
        config.twilio_phone_number.clone(),
        config.http_timeout,
    ));

    let mut monitor = ListingMonitor::new(
        gametime.clone(),
        gametime,
        twilio,
        criteria,
        config.monitor_settings(&cli.event_id, &cli.send_to),
    );

    tokio::select! {
        reason = monitor.run() => {
            error!("Monitor stopped: {}", reason);
            bail!("listing monitor stopped: {reason}");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}
