//! The payroll input document.

use serde::{Deserialize, Serialize};

use super::{EmployeeRecord, JobRate};

/// A complete payroll input: the job rate table and every employee's punches.
///
/// The JSON form uses the keys `jobMeta` and `employeeData`. Keys are
/// lower-cased by the input loader before deserialization, which is why the
/// serde names here are all lower case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollDocument {
    /// Job rates, in input order.
    #[serde(rename = "jobmeta", default)]
    pub job_meta: Vec<JobRate>,
    /// Employees, in input order.
    #[serde(rename = "employeedata", default)]
    pub employee_data: Vec<EmployeeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "jobmeta": [{"job": "A", "rate": 10, "benefitsrate": 1}],
            "employeedata": [{"employee": "Mike", "timepunch": []}]
        }"#;

        let document: PayrollDocument = serde_json::from_str(json).unwrap();
        assert_eq!(document.job_meta.len(), 1);
        assert_eq!(document.employee_data[0].employee_id, "Mike");
    }

    #[test]
    fn test_empty_object_is_an_empty_document() {
        let document: PayrollDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(document, PayrollDocument::default());
    }

    #[test]
    fn test_null_is_rejected() {
        let result: Result<PayrollDocument, _> = serde_json::from_str("null");
        assert!(result.is_err());
    }
}
