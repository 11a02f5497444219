//! API Gateway service - binds the HTTP listener and serves the router.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::{routes, AppState};
use ath_02_progress::ProgressApi;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// HTTP front end over a `ProgressApi`.
pub struct GatewayService {
    config: GatewayConfig,
    api: Arc<dyn ProgressApi>,
}

impl GatewayService {
    /// Create a new gateway, rejecting invalid configuration.
    pub fn new(config: GatewayConfig, api: Arc<dyn ProgressApi>) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self { config, api })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Routes with tracing and timeout middleware applied.
    pub fn router(&self) -> Result<Router, GatewayError> {
        let identity_header = self
            .config
            .identity_header_name()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        let state = AppState {
            api: Arc::clone(&self.api),
            identity_header,
        };

        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout));

        Ok(routes(state).layer(middleware))
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn start<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router()?;
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!(%addr, "[ath-03] HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| GatewayError::Server(e.to_string()))?;

        info!("[ath-03] HTTP server stopped");
        Ok(())
    }
}
