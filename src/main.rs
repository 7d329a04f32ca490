use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::SmartThingsClient;
use crate::config::Config;
use crate::models::PowerState;

mod api;
mod config;
mod models;

const LOG_FILE: &str = "tv-source-switch.log";

/// Power on a SmartThings TV and switch its input source
#[derive(Parser, Debug)]
#[command(name = "tvsourceswitch", version)]
struct Cli {
    /// Config file path, overriding the default search locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input source to switch to, overriding the configured one
    #[arg(long)]
    source: Option<String>,
}

/// Log to stdout and append to `~/tv-source-switch.log`
fn init_logging() -> Result<()> {
    let log_path = dirs::home_dir().unwrap_or_default().join(LOG_FILE);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    Ok(())
}

/// Health-check the TV, power it on, then switch its input. Stops at the
/// first step the device does not acknowledge.
async fn switch_source(client: &SmartThingsClient, source: &str) -> Result<()> {
    let status = client
        .get_status()
        .await
        .context("Failed to fetch device health")?;
    info!(
        "Device {} is {} (last updated {})",
        status.device_id, status.state, status.last_updated_date
    );

    if !status.is_online() {
        bail!("Device is not online (state: {})", status.state);
    }

    let result = client
        .set_power(PowerState::On)
        .await
        .context("Failed to switch on power")?;
    if !result.is_accepted() {
        bail!("Power-on command was not accepted (status: {})", result.status);
    }
    info!("Power on accepted");

    let result = client
        .set_source(source)
        .await
        .with_context(|| format!("Failed to switch source to {}", source))?;
    if !result.is_accepted() {
        bail!(
            "Source-switch command was not accepted (status: {})",
            result.status
        );
    }
    info!("Input source switched to {}", source);

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let source = cli.source.unwrap_or(config.source);

    let client = SmartThingsClient::builder()
        .token(config.smartthings_token)
        .device_id(config.smartthings_device_id)
        .build()
        .context("Failed to build SmartThings client")?;

    switch_source(&client, &source).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
