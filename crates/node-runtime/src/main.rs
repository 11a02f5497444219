//! # Athenaeum Node
//!
//! Server entry point. See `node_runtime` for the startup sequence.

use anyhow::{Context, Result};
use athenaeum_telemetry::init_telemetry;
use node_runtime::container::NodeConfig;
use node_runtime::NodeRuntime;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.telemetry).context("Failed to initialise logging")?;

    info!(
        addr = %config.gateway.http_addr(),
        catalog = ?config.catalog.path,
        "Configuration loaded"
    );

    let runtime = NodeRuntime::new(config)?;
    runtime
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl+C, running until killed");
                std::future::pending::<()>().await;
            }
            info!("Received shutdown signal");
        })
        .await
}
