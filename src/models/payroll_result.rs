//! Payroll result model.
//!
//! This module contains the [`PayrollResult`] type emitted once per employee
//! whose punches were processed without an employee-level failure.

use serde::{Deserialize, Serialize};

/// The payroll summary for one employee.
///
/// All numeric fields are fixed 4-decimal strings as produced by
/// [`format_fixed`](crate::calculation::format_fixed).
///
/// # Example
///
/// ```
/// use punch_payroll::models::PayrollResult;
///
/// let result = PayrollResult {
///     employee: "Mike".to_string(),
///     regular: "40.0000".to_string(),
///     overtime: "8.0000".to_string(),
///     doubletime: "2.0000".to_string(),
///     wage_total: "560.0000".to_string(),
///     benefit_total: "50.0000".to_string(),
/// };
/// let json = serde_json::to_string(&result).unwrap();
/// assert!(json.contains("\"wageTotal\":\"560.0000\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollResult {
    /// Identifier of the employee.
    pub employee: String,
    /// Hours paid at the regular multiplier.
    pub regular: String,
    /// Hours paid at the overtime multiplier.
    pub overtime: String,
    /// Hours paid at the doubletime multiplier.
    pub doubletime: String,
    /// Total wages across all tiers.
    pub wage_total: String,
    /// Total benefits.
    pub benefit_total: String,
}
