//! Error types for the Punch Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading input and
//! calculating payroll.
//!
//! Punch-level problems (a negative duration or an unknown job) are not
//! errors: they are recovered locally and reported through a
//! [`DiagnosticSink`](crate::diagnostics::DiagnosticSink).

use thiserror::Error;

/// The main error type for the Punch Payroll Engine.
///
/// # Example
///
/// ```
/// use punch_payroll::error::PayrollError;
///
/// let error = PayrollError::InputNotFound {
///     path: "PunchLogicTest.json".to_string(),
/// };
/// assert_eq!(error.to_string(), "Input file not found: PunchLogicTest.json");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The payroll input document was not found at the specified path.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The payroll input document could not be decoded.
    #[error("Failed to parse input document '{source_name}': {message}")]
    InputParseError {
        /// Where the document came from (a path, or "request body").
        source_name: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A punch timestamp could not be parsed.
    #[error("Invalid {field} timestamp '{value}' for job '{job_id}'")]
    InvalidTimestamp {
        /// The job the punch was recorded against.
        job_id: String,
        /// Which end of the punch failed ("start" or "end").
        field: &'static str,
        /// The raw timestamp text.
        value: String,
    },

    /// A punch has no start or end timestamp.
    #[error("Missing {field} timestamp for job '{job_id}'")]
    MissingTimestamp {
        /// The job the punch was recorded against.
        job_id: String,
        /// Which end of the punch is missing ("start" or "end").
        field: &'static str,
    },

    /// An employee's punch list is `null`.
    #[error("Punch list is null")]
    MissingPunchList,

    /// A wage or benefit amount does not fit in a decimal.
    #[error("Arithmetic overflow computing {quantity} for job '{job_id}'")]
    ArithmeticOverflow {
        /// The job whose rates were being applied.
        job_id: String,
        /// The amount being computed, e.g. "overtime wage".
        quantity: &'static str,
    },

    /// The diagnostic log file could not be opened or written.
    #[error("Failed to write diagnostic log '{path}': {message}")]
    DiagnosticLog {
        /// The path of the log file.
        path: String,
        /// A description of the I/O error.
        message: String,
    },

    /// The payroll output could not be written.
    #[error("Failed to write payroll output: {message}")]
    Output {
        /// A description of the failure.
        message: String,
    },

    /// The logging subscriber could not be installed.
    #[error("Failed to initialise logging with filter '{filter}': {message}")]
    Telemetry {
        /// The log filter that was requested.
        filter: String,
        /// A description of the failure.
        message: String,
    },

    /// The HTTP server could not bind or stopped with an error.
    #[error("HTTP server error on {address}: {message}")]
    Server {
        /// The address the server was bound to.
        address: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type EngineResult<T> = Result<T, PayrollError>;

/// Failure to produce a payroll result for one employee.
///
/// Wraps the error that aborted the employee's pipeline together with the
/// employee it belongs to. Other employees in the same run are unaffected.
#[derive(Debug, Error)]
#[error("payroll for employee '{employee_id}' could not be calculated: {source}")]
pub struct EmployeeFailure {
    /// The employee whose payroll was abandoned.
    pub employee_id: String,
    /// The underlying error.
    #[source]
    pub source: PayrollError,
}
