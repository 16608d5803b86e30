//! Getting-started walkthrough binary.
//!
//! Connects to the vault at `PVAULT_ADDRESS` with the bearer token in
//! `PVAULT_TOKEN` and runs every step of the walkthrough.

mod telemetry;

use anyhow::{Context, Result};
use pvault_sdk::{VaultClient, VaultConfig};
use tracing::info;

use crate::telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(&TelemetryConfig::from_env())?;

    let config = VaultConfig::from_env();
    info!(address = %config.base_url, "Connecting to the vault");
    let client = VaultClient::new(config).context("Failed to create the vault client")?;

    let outcome = pvault_getting_started::run(&client).await?;
    info!(
        customers = outcome.customer_ids.len(),
        token = %outcome.token_id,
        "Walkthrough complete"
    );
    Ok(())
}
