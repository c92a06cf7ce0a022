//! Logging and trace export for nestpilot.
//!
//! Installs a `tracing` subscriber with an env filter, a stderr fmt layer and,
//! when an endpoint is configured, an OpenTelemetry OTLP layer.
//!
//! ```no_run
//! use nest_observability::{init, ObservabilityConfig};
//!
//! # fn main() -> Result<(), nest_observability::ObservabilityError> {
//! let config = ObservabilityConfig::new("nestpilot-cli").with_log_level("debug");
//! init(config)?;
//! tracing::info!("started");
//! nest_observability::shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `NESTPILOT_LOG`, `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};
