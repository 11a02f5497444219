//! # Athenaeum Node Runtime
//!
//! Wires the catalog, the document store, the progress engine and the HTTP
//! gateway into one process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (TOML file + environment)
//! 2. Initialise logging
//! 3. Build services (catalog → store → engine)
//! 4. Serve HTTP until Ctrl+C, then drain in-flight requests

pub mod container;

use anyhow::{Context, Result};
use ath_03_api_gateway::GatewayService;
use container::{NodeConfig, ServiceContainer};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The running node.
pub struct NodeRuntime {
    container: Arc<ServiceContainer>,
}

impl NodeRuntime {
    pub fn new(config: NodeConfig) -> Result<Self> {
        info!("Creating Athenaeum node runtime");
        let container = Arc::new(ServiceContainer::new(config)?);
        Ok(Self { container })
    }

    pub fn container(&self) -> Arc<ServiceContainer> {
        Arc::clone(&self.container)
    }

    fn gateway(&self) -> Result<GatewayService> {
        GatewayService::new(
            self.container.config.gateway.clone(),
            self.container.progress.clone(),
        )
        .context("Failed to create API gateway")
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("===========================================");
        info!("  Athenaeum Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        self.gateway()?
            .start(shutdown)
            .await
            .context("API gateway failed")?;

        info!("Shutdown complete");
        Ok(())
    }

    /// Serves on an already bound listener.
    pub async fn run_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.gateway()?
            .serve(listener, shutdown)
            .await
            .context("API gateway failed")
    }
}
