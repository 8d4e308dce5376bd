//! Payroll input document loading.
//!
//! Field names in the input document are matched case-insensitively: keys
//! are lower-cased at every level before the document is deserialized into
//! [`PayrollDocument`].

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{EngineResult, PayrollError};
use crate::models::PayrollDocument;

/// Loads a payroll document from a JSON file.
///
/// # Errors
///
/// - [`PayrollError::InputNotFound`] if the file cannot be read
/// - [`PayrollError::InputParseError`] if it is not a valid payroll document
///
/// # Example
///
/// ```no_run
/// use punch_payroll::input::load_document;
///
/// let document = load_document("PunchLogicTest.json")?;
/// println!("{} employees", document.employee_data.len());
/// # Ok::<(), punch_payroll::error::PayrollError>(())
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> EngineResult<PayrollDocument> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| PayrollError::InputNotFound {
        path: path_str.clone(),
    })?;

    parse_document(&content, &path_str)
}

/// Parses a payroll document from JSON text.
///
/// `source_name` identifies the text in error messages.
///
/// # Example
///
/// ```
/// use punch_payroll::input::parse_document;
///
/// let document = parse_document(
///     r#"{"JobMeta": [{"Job": "A", "Rate": 10, "BenefitsRate": 1}], "EmployeeData": []}"#,
///     "inline",
/// ).unwrap();
/// assert_eq!(document.job_meta[0].job_id, "A");
/// ```
pub fn parse_document(text: &str, source_name: &str) -> EngineResult<PayrollDocument> {
    let to_error = |e: serde_json::Error| PayrollError::InputParseError {
        source_name: source_name.to_string(),
        message: e.to_string(),
    };

    let raw: Value = serde_json::from_str(text).map_err(to_error)?;
    serde_json::from_value(lowercase_keys(raw)).map_err(to_error)
}

/// Recursively lower-cases every object key.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}
