//! Employee-level and run-level payroll orchestration.
//!
//! This module wires the punch validator, job catalog, tier allocator and
//! formatter together: [`calculate_employee_payroll`] processes one
//! employee, [`run_payroll`] processes a whole document and
//! [`run_payroll_from_path`] loads a document from disk first.

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::error::{EmployeeFailure, PayrollError};
use crate::input::load_document;
use crate::models::{EmployeeRecord, PayrollDocument, PayrollResult};

use super::formatter::format_fixed;
use super::job_catalog::JobRateCatalog;
use super::punch_validator::{PunchDuration, punch_duration};
use super::tier_allocator::{AllocatorState, TierAllocator, TierPolicy};

/// Calculates the payroll for one employee.
///
/// Punches are processed strictly in input order through a fresh
/// [`TierAllocator`]:
///
/// - a punch that ends before it starts is reported and skipped
/// - a punch whose job is not in `catalog` is reported and skipped
/// - every other punch is allocated to tiers
///
/// # Errors
///
/// Returns [`EmployeeFailure`] if the punch list is `null`, a punch
/// timestamp is missing or cannot be parsed, or a wage or benefit amount
/// overflows. No partial result is produced for the employee in that case.
/// The failure is not reported to `sink`; [`run_payroll`] does that.
///
/// # Example
///
/// ```
/// use punch_payroll::calculation::{calculate_employee_payroll, JobRateCatalog, TierPolicy};
/// use punch_payroll::diagnostics::DiagnosticBuffer;
/// use punch_payroll::models::{EmployeeRecord, JobRate, Punch};
/// use rust_decimal::Decimal;
///
/// let catalog = JobRateCatalog::new(vec![JobRate::new("A", Decimal::TEN, Decimal::ONE)]);
/// let record = EmployeeRecord::new(
///     "Mike",
///     vec![Punch::new("A", "2022-02-18 09:00:00", "2022-02-18 17:00:00")],
/// );
/// let sink = DiagnosticBuffer::new();
///
/// let result = calculate_employee_payroll(&record, &catalog, &TierPolicy::default(), &sink).unwrap();
/// assert_eq!(result.regular, "8.0000");
/// assert_eq!(result.wage_total, "80.0000");
/// assert!(sink.is_empty());
/// ```
pub fn calculate_employee_payroll<S>(
    record: &EmployeeRecord,
    catalog: &JobRateCatalog,
    policy: &TierPolicy,
    sink: &S,
) -> Result<PayrollResult, EmployeeFailure>
where
    S: DiagnosticSink + ?Sized,
{
    let employee_id = &record.employee_id;
    let fail = |source: PayrollError| EmployeeFailure {
        employee_id: employee_id.clone(),
        source,
    };
    let punches = record
        .punches
        .as_deref()
        .ok_or_else(|| fail(PayrollError::MissingPunchList))?;
    let mut allocator = TierAllocator::new(policy.clone());

    for (index, punch) in punches.iter().enumerate() {
        let hours = match punch_duration(punch) {
            Ok(PunchDuration::Valid(hours)) => hours,
            Ok(PunchDuration::Invalid(reason)) => {
                warn!(
                    employee_id = %employee_id,
                    job_id = %punch.job_id,
                    punch_index = index,
                    reason = %reason,
                    "Skipping invalid punch"
                );
                sink.report(Diagnostic::new(DiagnosticKind::NegativeDuration {
                    employee_id: employee_id.clone(),
                    job_id: punch.job_id.clone(),
                }));
                continue;
            }
            Err(source) => return Err(fail(source)),
        };

        let Some(rate) = catalog.lookup(&punch.job_id) else {
            warn!(
                employee_id = %employee_id,
                job_id = %punch.job_id,
                punch_index = index,
                "Skipping punch for unknown job"
            );
            sink.report(Diagnostic::new(DiagnosticKind::UnknownJob {
                employee_id: employee_id.clone(),
                job_id: punch.job_id.clone(),
            }));
            continue;
        };

        let allocation = allocator.apply(hours, rate).map_err(fail)?;
        debug!(
            employee_id = %employee_id,
            job_id = %punch.job_id,
            punch_index = index,
            hours = %hours,
            regular_hours = %allocation.regular_hours,
            overtime_hours = %allocation.overtime_hours,
            doubletime_hours = %allocation.doubletime_hours,
            wage = %allocation.wage,
            benefit = %allocation.benefit,
            "Allocated punch"
        );
    }

    Ok(to_payroll_result(employee_id, allocator.finish()))
}

/// Calculates payroll for every employee in a document.
///
/// Employees are processed in input order, each with its own allocator.
/// Employees that fail are reported to `sink` and left out; the returned
/// results keep the input order of the employees that succeeded.
///
/// # Example
///
/// ```
/// use punch_payroll::calculation::{run_payroll, TierPolicy};
/// use punch_payroll::diagnostics::DiagnosticBuffer;
/// use punch_payroll::models::{EmployeeRecord, JobRate, PayrollDocument, Punch};
/// use rust_decimal::Decimal;
///
/// let document = PayrollDocument {
///     job_meta: vec![JobRate::new("A", Decimal::TEN, Decimal::ONE)],
///     employee_data: vec![
///         EmployeeRecord::new("Broken", vec![Punch::new("A", "soon", "later")]),
///         EmployeeRecord::new(
///             "Mike",
///             vec![Punch::new("A", "2022-02-18 09:00:00", "2022-02-18 10:00:00")],
///         ),
///     ],
/// };
/// let sink = DiagnosticBuffer::new();
///
/// let results = run_payroll(&document, &TierPolicy::default(), &sink);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].employee, "Mike");
/// assert_eq!(sink.len(), 1);
/// ```
pub fn run_payroll<S>(
    document: &PayrollDocument,
    policy: &TierPolicy,
    sink: &S,
) -> Vec<PayrollResult>
where
    S: DiagnosticSink + ?Sized,
{
    let catalog: JobRateCatalog = document.job_meta.iter().cloned().collect();
    info!(
        jobs = catalog.len(),
        employees = document.employee_data.len(),
        "Starting payroll run"
    );

    let results: Vec<PayrollResult> = document
        .employee_data
        .iter()
        .filter_map(
            |record| match calculate_employee_payroll(record, &catalog, policy, sink) {
                Ok(result) => Some(result),
                Err(failure) => {
                    warn!(
                        employee_id = %failure.employee_id,
                        error = %failure.source,
                        "Employee left out of payroll"
                    );
                    sink.report(Diagnostic::new(DiagnosticKind::EmployeeFailure {
                        employee_id: failure.employee_id,
                        detail: failure.source.to_string(),
                    }));
                    None
                }
            },
        )
        .collect();

    info!(
        calculated = results.len(),
        skipped = document.employee_data.len() - results.len(),
        "Payroll run completed"
    );
    results
}

/// Loads a payroll document from `path` and calculates it.
///
/// A document that cannot be read or decoded is fatal for the run: it is
/// reported to `sink` as a single load failure and `None` is returned, so
/// the caller writes no output.
///
/// # Example
///
/// ```
/// use punch_payroll::calculation::{run_payroll_from_path, TierPolicy};
/// use punch_payroll::diagnostics::DiagnosticBuffer;
///
/// let sink = DiagnosticBuffer::new();
/// let results = run_payroll_from_path("/no/such/PunchLogicTest.json", &TierPolicy::default(), &sink);
/// assert!(results.is_none());
/// assert_eq!(sink.len(), 1);
/// ```
pub fn run_payroll_from_path<P, S>(
    path: P,
    policy: &TierPolicy,
    sink: &S,
) -> Option<Vec<PayrollResult>>
where
    P: AsRef<Path>,
    S: DiagnosticSink + ?Sized,
{
    match load_document(path.as_ref()) {
        Ok(document) => Some(run_payroll(&document, policy, sink)),
        Err(err) => {
            error!(
                path = %path.as_ref().display(),
                error = %err,
                "Payroll document could not be loaded"
            );
            sink.report(Diagnostic::new(DiagnosticKind::LoadFailure {
                detail: err.to_string(),
            }));
            None
        }
    }
}

fn to_payroll_result(employee_id: &str, state: AllocatorState) -> PayrollResult {
    PayrollResult {
        employee: employee_id.to_string(),
        regular: format_fixed(state.regular),
        overtime: format_fixed(state.overtime),
        doubletime: format_fixed(state.doubletime),
        wage_total: format_fixed(state.wage_total),
        benefit_total: format_fixed(state.benefit_total),
    }
}
