//! Logging setup.
//!
//! Installs a `tracing-subscriber` formatter writing to stderr, so that
//! stdout carries nothing but the payroll output.

use tracing_subscriber::EnvFilter;

use crate::error::{EngineResult, PayrollError};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when it is set and valid.
pub fn init(log_level: &str) -> EngineResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|e| PayrollError::Telemetry {
            filter: log_level.to_string(),
            message: e.to_string(),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| PayrollError::Telemetry {
            filter: log_level.to_string(),
            message: e.to_string(),
        })
}
