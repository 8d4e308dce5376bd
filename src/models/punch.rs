//! Punch and employee record models.
//!
//! This module defines the [`Punch`] and [`EmployeeRecord`] structs that
//! carry an employee's recorded work intervals.
//!
//! Fields that only matter while one employee is processed accept any JSON
//! value, so a `null` or non-text entry fails that employee during the run
//! instead of failing the whole document at load time.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One recorded start/end interval an employee worked on a job.
///
/// Timestamps are kept as the raw text from the input document. They are
/// parsed by [`punch_duration`](crate::calculation::punch_duration), so that
/// a malformed or missing timestamp aborts only the employee that owns the
/// punch. Non-text timestamps are kept as their JSON rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// The job the time was worked on. A `null` job never matches a rate.
    #[serde(rename = "job", default, deserialize_with = "text_or_empty")]
    pub job_id: String,
    /// When the interval started, if recorded.
    #[serde(default, deserialize_with = "optional_text")]
    pub start: Option<String>,
    /// When the interval ended, if recorded.
    #[serde(default, deserialize_with = "optional_text")]
    pub end: Option<String>,
}

impl Punch {
    /// Creates a punch from raw timestamp text.
    pub fn new(job_id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

/// An employee together with their punches, in recorded order.
///
/// Punch order is significant: tier accrual is stateful, so punches are
/// processed strictly in sequence and never re-sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Identifier of the employee.
    #[serde(rename = "employee", default, deserialize_with = "text_or_empty")]
    pub employee_id: String,
    /// The employee's punches.
    ///
    /// A missing list is empty; an explicit `null` is `None` and fails the
    /// employee when it is processed.
    #[serde(rename = "timepunch", default = "no_punches")]
    pub punches: Option<Vec<Punch>>,
}

impl EmployeeRecord {
    /// Creates a record with the given punches.
    pub fn new(employee_id: impl Into<String>, punches: Vec<Punch>) -> Self {
        Self {
            employee_id: employee_id.into(),
            punches: Some(punches),
        }
    }
}

fn no_punches() -> Option<Vec<Punch>> {
    Some(Vec::new())
}

/// Reads any JSON value as optional text: `null` is `None`, strings are kept
/// as-is and anything else keeps its JSON rendering.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_text(deserializer).map(Option::unwrap_or_default)
}
