//! Calculation logic for the Punch Payroll Engine.
//!
//! This module contains the job rate catalog, punch duration validation,
//! the cascading Regular/Overtime/Doubletime tier allocator, fixed-precision
//! formatting of totals, and the employee and run level orchestration that
//! ties them together.

mod formatter;
mod job_catalog;
mod payroll_run;
mod punch_validator;
mod tier_allocator;

pub use formatter::{OUTPUT_DECIMAL_PLACES, format_fixed};
pub use job_catalog::JobRateCatalog;
pub use payroll_run::{calculate_employee_payroll, run_payroll, run_payroll_from_path};
pub use punch_validator::{InvalidPunch, PunchDuration, punch_duration};
pub use tier_allocator::{
    AllocatorState, DOUBLETIME_MULTIPLIER, OVERTIME_HOURS_CAP, OVERTIME_MULTIPLIER,
    REGULAR_HOURS_CAP, REGULAR_MULTIPLIER, TierAllocation, TierAllocator, TierPolicy,
};
