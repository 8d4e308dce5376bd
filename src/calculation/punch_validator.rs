//! Punch duration calculation and validation.
//!
//! This module converts a punch's raw start/end text into worked hours and
//! rejects punches whose end precedes their start.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{EngineResult, PayrollError};
use crate::models::Punch;

/// Milliseconds in one hour.
const MILLIS_PER_HOUR: Decimal = Decimal::from_parts(3_600_000, 0, 0, false, 0);

/// Date-time layouts accepted in addition to RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Why a punch was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPunch {
    /// The punch ends before it starts.
    StartAfterEnd,
}

impl fmt::Display for InvalidPunch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPunch::StartAfterEnd => write!(f, "start after end"),
        }
    }
}

/// The outcome of validating a punch's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchDuration {
    /// Non-negative worked hours.
    Valid(Decimal),
    /// The punch must be skipped without touching any totals.
    Invalid(InvalidPunch),
}

/// Computes the hours worked for a punch.
///
/// # Returns
///
/// - `Ok(PunchDuration::Valid(hours))` when `end >= start`
/// - `Ok(PunchDuration::Invalid(InvalidPunch::StartAfterEnd))` when `end < start`
/// - `Err(PayrollError::MissingTimestamp)` when either timestamp is absent
/// - `Err(PayrollError::InvalidTimestamp)` when either timestamp cannot be parsed
///
/// Time math is plain duration subtraction at millisecond resolution; no
/// timezone rules are applied. Timestamps carrying an offset are converted
/// to UTC first.
///
/// # Example
///
/// ```
/// use punch_payroll::calculation::{punch_duration, PunchDuration};
/// use punch_payroll::models::Punch;
/// use rust_decimal::Decimal;
///
/// let punch = Punch::new("A", "2022-02-18 09:00:00", "2022-02-18 17:30:00");
/// let duration = punch_duration(&punch).unwrap();
/// assert_eq!(duration, PunchDuration::Valid(Decimal::new(85, 1)));
/// ```
pub fn punch_duration(punch: &Punch) -> EngineResult<PunchDuration> {
    let start = punch_timestamp(punch, punch.start.as_deref(), "start")?;
    let end = punch_timestamp(punch, punch.end.as_deref(), "end")?;

    let worked_millis = (end - start).num_milliseconds();
    if worked_millis < 0 {
        return Ok(PunchDuration::Invalid(InvalidPunch::StartAfterEnd));
    }

    Ok(PunchDuration::Valid(
        Decimal::from(worked_millis) / MILLIS_PER_HOUR,
    ))
}

fn punch_timestamp(
    punch: &Punch,
    text: Option<&str>,
    field: &'static str,
) -> EngineResult<NaiveDateTime> {
    let text = text.ok_or_else(|| PayrollError::MissingTimestamp {
        job_id: punch.job_id.clone(),
        field,
    })?;
    parse_timestamp(text).ok_or_else(|| PayrollError::InvalidTimestamp {
        job_id: punch.job_id.clone(),
        field,
        value: text.to_string(),
    })
}

/// Parses a punch timestamp in any of the accepted layouts.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Some(with_offset.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
