//! # Props Telemetry
//!
//! Structured logging for processes hosting the props ledger.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use props_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config).expect("Failed to init tracing");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PROPS_SERVICE_NAME` | `props-ledger` | Service name attached to startup log |
//! | `PROPS_LOG_LEVEL` | `info` | Log level filter |
//! | `PROPS_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `RUST_LOG` | - | Overrides `PROPS_LOG_LEVEL` when set |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed (bad filter or already set).
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),
}
