//! Core data models for the Punch Payroll Engine.
//!
//! This module contains the input document, job rate, punch and payroll
//! result types used throughout the engine.

mod document;
mod job_rate;
mod payroll_result;
mod punch;

pub use document::PayrollDocument;
pub use job_rate::JobRate;
pub use payroll_result::PayrollResult;
pub use punch::{EmployeeRecord, Punch};
