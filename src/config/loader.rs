//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineResult, PayrollError};

use super::types::PayrollConfig;

/// Settings file looked up in the working directory when none is named.
pub const DEFAULT_CONFIG_PATH: &str = "punch-payroll.yaml";

/// Loads and provides access to the engine configuration.
///
/// # File Format
///
/// ```yaml
/// input_path: PunchLogicTest.json
/// error_log_path: ErrorLog.txt
/// log_level: info
/// server:
///   host: 127.0.0.1
///   port: 3000
/// tiers:
///   regular_cap: 40
///   overtime_cap: 8
///   regular_multiplier: 1.0
///   overtime_multiplier: 1.5
///   doubletime_multiplier: 2.0
/// ```
///
/// Every key is optional.
///
/// # Example
///
/// ```no_run
/// use punch_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./punch-payroll.yaml")?;
/// println!("Reading punches from {}", loader.config().input_path.display());
/// # Ok::<(), punch_payroll::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Errors
    ///
    /// - [`PayrollError::ConfigNotFound`] if the file cannot be read
    /// - [`PayrollError::ConfigParseError`] if it is not valid YAML, or a
    ///   tier cap or multiplier is negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Loads the named file, or [`DEFAULT_CONFIG_PATH`] if it exists, or
    /// falls back to built-in defaults.
    ///
    /// A file that is named explicitly must exist.
    pub fn load_or_default(path: Option<&Path>) -> EngineResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Parses configuration from YAML text.
    ///
    /// `path` is only used in error messages.
    pub fn from_yaml_str(content: &str, path: &str) -> EngineResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        let config: PayrollConfig = if content.trim().is_empty() {
            PayrollConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?
        };

        Self::validate(&config, path)?;
        Ok(Self { config })
    }

    fn validate(config: &PayrollConfig, path: &str) -> EngineResult<()> {
        let tiers = &config.tiers;
        let fields = [
            ("regular_cap", tiers.regular_cap),
            ("overtime_cap", tiers.overtime_cap),
            ("regular_multiplier", tiers.regular_multiplier),
            ("overtime_multiplier", tiers.overtime_multiplier),
            ("doubletime_multiplier", tiers.doubletime_multiplier),
        ];

        match fields.iter().find(|(_, value)| *value < Decimal::ZERO) {
            Some((name, value)) => Err(PayrollError::ConfigParseError {
                path: path.to_string(),
                message: format!("tiers.{name} must not be negative (got {value})"),
            }),
            None => Ok(()),
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }
}
