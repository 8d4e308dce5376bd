//! Job rate model.
//!
//! A [`JobRate`] is one entry of the job metadata list: the hourly wage and
//! the hourly benefits rate paid for work recorded against a job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pay rates for a single job.
///
/// Job rates are immutable once loaded. Field names follow the input
/// document (`job`, `rate`, `benefitsRate`), matched case-insensitively by
/// the input loader.
///
/// # Example
///
/// ```
/// use punch_payroll::models::JobRate;
/// use rust_decimal::Decimal;
///
/// let rate = JobRate::new("Hospital - Painter", Decimal::new(3125, 2), Decimal::new(1, 0));
/// assert_eq!(rate.job_id, "Hospital - Painter");
/// assert_eq!(rate.hourly_rate.to_string(), "31.25");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRate {
    /// The job identifier punches refer to.
    #[serde(rename = "job")]
    pub job_id: String,
    /// Wage paid per regular hour.
    #[serde(rename = "rate")]
    pub hourly_rate: Decimal,
    /// Benefits paid per hour, regardless of tier.
    #[serde(rename = "benefitsrate")]
    pub benefits_rate: Decimal,
}

impl JobRate {
    /// Creates a job rate.
    pub fn new(job_id: impl Into<String>, hourly_rate: Decimal, benefits_rate: Decimal) -> Self {
        Self {
            job_id: job_id.into(),
            hourly_rate,
            benefits_rate,
        }
    }
}
