//! Configuration types for the Punch Payroll Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML settings file. Every field has a default,
//! so an empty file (or no file at all) is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calculation::TierPolicy;

/// Default location of the payroll input document.
pub const DEFAULT_INPUT_PATH: &str = "PunchLogicTest.json";

/// Default location of the diagnostic log.
pub const DEFAULT_ERROR_LOG_PATH: &str = "ErrorLog.txt";

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Path of the JSON payroll document processed by `run`.
    pub input_path: PathBuf,
    /// Path of the file diagnostics are appended to.
    pub error_log_path: PathBuf,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// HTTP server settings used by `serve`.
    pub server: ServerConfig,
    /// Tier caps and multipliers.
    pub tiers: TierPolicy,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            error_log_path: PathBuf::from(DEFAULT_ERROR_LOG_PATH),
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            tiers: TierPolicy::default(),
        }
    }
}
