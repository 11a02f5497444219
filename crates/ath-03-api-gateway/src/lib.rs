//! # ath-03-api-gateway
//!
//! HTTP surface for the progress engine, built on axum.
//!
//! ## Request Pipeline
//!
//! ```text
//! request → TraceLayer → TimeoutLayer → CallerIdentity (401)
//!         → body validation (400) → ProgressApi → {message} | {error}
//! ```
//!
//! Authentication is done upstream. The gateway trusts the player id found
//! in the configured identity header and nothing else.
//!
//! ## Error Mapping
//!
//! Validation, domain and not-found errors become `400 {error}` with the
//! engine's message. Store failures and exhausted retries become a generic
//! `500 {error}`; details go to the log only.

#![warn(clippy::all)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::{ApiError, GatewayError};
pub use router::{routes, AppState};
pub use service::GatewayService;
