//! Diagnostic reporting for recovered and fatal payroll problems.
//!
//! The calculation pipeline never writes diagnostics itself. It reports
//! [`Diagnostic`]s to an injected [`DiagnosticSink`]; where they end up is
//! decided by the caller:
//!
//! - [`DiagnosticLog`] appends each line to a log file and mirrors it to stderr
//! - [`DiagnosticBuffer`] keeps them in memory (HTTP responses and tests)

mod buffer;
mod log;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use serde::Serialize;

pub use buffer::DiagnosticBuffer;
pub use log::DiagnosticLog;

/// Timestamp layout used when rendering diagnostic lines.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The condition a diagnostic describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The input document could not be loaded; no payroll was produced.
    LoadFailure {
        /// Why loading failed.
        detail: String,
    },
    /// A punch ended before it started and was skipped.
    NegativeDuration {
        /// The employee that owns the punch.
        employee_id: String,
        /// The job the punch was recorded against.
        job_id: String,
    },
    /// A punch referenced a job missing from the job rates and was skipped.
    UnknownJob {
        /// The employee that owns the punch.
        employee_id: String,
        /// The unknown job.
        job_id: String,
    },
    /// An employee's payroll could not be calculated and was left out.
    EmployeeFailure {
        /// The employee that was left out.
        employee_id: String,
        /// The underlying failure.
        detail: String,
    },
}

impl DiagnosticKind {
    /// A stable machine-readable code for the condition.
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::LoadFailure { .. } => "LOAD_FAILURE",
            DiagnosticKind::NegativeDuration { .. } => "NEGATIVE_DURATION",
            DiagnosticKind::UnknownJob { .. } => "UNKNOWN_JOB",
            DiagnosticKind::EmployeeFailure { .. } => "EMPLOYEE_FAILURE",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::LoadFailure { detail } => {
                write!(f, "JSON file not deserialized successfully: {detail}")
            }
            DiagnosticKind::NegativeDuration {
                employee_id,
                job_id,
            } => write!(
                f,
                "For employee {employee_id} the job: {job_id} has a Start time that is after its End time, hours for this job will not be counted"
            ),
            DiagnosticKind::UnknownJob {
                employee_id,
                job_id,
            } => write!(
                f,
                "For employee {employee_id} the job: {job_id} does not exist in given jobmeta, hours for this job will not be counted"
            ),
            DiagnosticKind::EmployeeFailure {
                employee_id,
                detail,
            } => write!(
                f,
                "For employee {employee_id} payroll could not be calculated due to error: {detail}"
            ),
        }
    }
}

/// A timestamped, human-readable report of a payroll problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// When the problem was observed.
    pub timestamp: DateTime<Local>,
    /// What happened.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic stamped with the current local time.
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            timestamp: Local::now(),
            kind,
        }
    }

    /// The message text, without the timestamp.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// The full log line: `<timestamp> Error: <message>`.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_payroll::diagnostics::{Diagnostic, DiagnosticKind};
    ///
    /// let diagnostic = Diagnostic::new(DiagnosticKind::UnknownJob {
    ///     employee_id: "Mike".to_string(),
    ///     job_id: "Roofer".to_string(),
    /// });
    /// assert!(diagnostic.line().contains(" Error: For employee Mike the job: Roofer"));
    /// ```
    pub fn line(&self) -> String {
        format!(
            "{} Error: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind
        )
    }
}

/// Receives diagnostics from the payroll pipeline.
///
/// Sinks take `&self` and must serialize concurrent writes internally, so a
/// single sink can be shared between HTTP requests.
pub trait DiagnosticSink {
    /// Records one diagnostic. Sinks must not fail the payroll run.
    fn report(&self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
