//! # Athenaeum Telemetry
//!
//! Structured logging for every Athenaeum binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use athenaeum_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ATH_SERVICE_NAME` | `athenaeum` | Service name in the startup log |
//! | `ATH_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directive |
//! | `ATH_JSON_LOGS` | `true` in containers | JSON output |
//! | `NO_COLOR` | unset | Disable ANSI colours |

mod config;
mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::{build_filter, init_telemetry};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}
