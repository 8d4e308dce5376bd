//! Job rate catalog lookup.
//!
//! This module provides the [`JobRateCatalog`], the immutable lookup table
//! from job id to [`JobRate`] consulted for every punch.

use std::collections::HashMap;

use crate::models::JobRate;

/// Lookup table from job id to its pay rates.
///
/// Built once from the loaded job list and never mutated during allocation.
/// Job id uniqueness is not enforced: when the same id appears more than
/// once, the first entry in input order wins.
///
/// # Example
///
/// ```
/// use punch_payroll::calculation::JobRateCatalog;
/// use punch_payroll::models::JobRate;
/// use rust_decimal::Decimal;
///
/// let catalog = JobRateCatalog::new(vec![JobRate::new("A", Decimal::TEN, Decimal::ONE)]);
/// assert!(catalog.lookup("A").is_some());
/// assert!(catalog.lookup("B").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct JobRateCatalog {
    rates: HashMap<String, JobRate>,
}

impl JobRateCatalog {
    /// Builds a catalog from job rates in input order.
    pub fn new(rates: impl IntoIterator<Item = JobRate>) -> Self {
        let mut by_id = HashMap::new();
        for rate in rates {
            by_id.entry(rate.job_id.clone()).or_insert(rate);
        }
        Self { rates: by_id }
    }

    /// Looks up the rates for a job.
    ///
    /// Returns `None` when the job is not in the catalog; the caller decides
    /// how to report the miss.
    pub fn lookup(&self, job_id: &str) -> Option<&JobRate> {
        self.rates.get(job_id)
    }

    /// Returns the number of distinct jobs.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the catalog holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<JobRate> for JobRateCatalog {
    fn from_iter<I: IntoIterator<Item = JobRate>>(iter: I) -> Self {
        Self::new(iter)
    }
}
