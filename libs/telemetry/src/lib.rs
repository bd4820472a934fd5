//! Logging setup shared by the Adaptive Card binaries.
//!
//! `install` reads `LOG_FORMAT` (`json` by default, `text`/`pretty`/`plain` for humans) and
//! `RUST_LOG` (default `info`) and installs a `tracing-subscriber` registry.

use anyhow::Result;

mod config;
mod tracing_init;

pub use config::{DEFAULT_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, LogFormat, TelemetryConfig};
pub use tracing_init::{init_tracing, is_initialised};

/// Installs the tracing subscriber configured from the environment.
pub fn install(service_name: &str) -> Result<()> {
    init_tracing(&TelemetryConfig::from_env(service_name))
}
