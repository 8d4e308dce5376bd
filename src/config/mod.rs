//! Configuration loading and management for the Punch Payroll Engine.
//!
//! This module provides functionality to load engine settings from a YAML
//! file: input and log locations, log level, HTTP bind address and the tier
//! policy.
//!
//! # Example
//!
//! ```no_run
//! use punch_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./punch-payroll.yaml").unwrap().into_config();
//! println!("Regular cap: {}", config.tiers.regular_cap);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use types::{DEFAULT_ERROR_LOG_PATH, DEFAULT_INPUT_PATH, PayrollConfig, ServerConfig};
