//! Assertion helpers shared by the checks
//!
//! Every helper returns an [`AssertionFailure`] carrying what was expected
//! and what the backend actually sent.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::http::{HttpError, HttpResponse};

/// A response that arrived but did not match expectations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssertionFailure {
    #[error("Expected status code {expected}, got {actual}")]
    UnexpectedStatus { expected: String, actual: u16 },

    #[error("Response does not contain '{0}' field")]
    MissingField(String),

    #[error("Expected {field} '{expected}', got {actual}")]
    ValueMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Missing {0} header")]
    MissingHeader(String),

    #[error("Response is not {0}")]
    UnexpectedShape(&'static str),

    #[error("Created status check with id {0} not found in the list")]
    NotListed(String),

    #[error("Response is not HTML (Content-Type: {0})")]
    NotHtml(String),

    #[error("'{0}' not found in response body")]
    MarkerMissing(String),
}

/// Why a check did not pass
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl CheckError {
    /// Assertion failures mean the backend answered wrongly; everything
    /// else means the check could not complete.
    pub fn is_assertion(&self) -> bool {
        matches!(self, CheckError::Assertion(_))
    }
}

/// Status code must be one of `allowed`
pub fn expect_status(resp: &HttpResponse, allowed: &[u16]) -> Result<(), AssertionFailure> {
    if allowed.contains(&resp.status_code) {
        return Ok(());
    }

    let expected = allowed
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" or ");

    Err(AssertionFailure::UnexpectedStatus {
        expected,
        actual: resp.status_code,
    })
}

pub fn expect_object(value: &Value) -> Result<&Map<String, Value>, AssertionFailure> {
    value
        .as_object()
        .ok_or(AssertionFailure::UnexpectedShape("a JSON object"))
}

pub fn expect_array(value: &Value) -> Result<&Vec<Value>, AssertionFailure> {
    value
        .as_array()
        .ok_or(AssertionFailure::UnexpectedShape("a list"))
}

pub fn expect_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, AssertionFailure> {
    object
        .get(field)
        .ok_or_else(|| AssertionFailure::MissingField(field.to_string()))
}

/// Field must be present and equal to the exact string `expected`
pub fn expect_str_field(
    object: &Map<String, Value>,
    field: &str,
    expected: &str,
) -> Result<(), AssertionFailure> {
    let actual = expect_field(object, field)?;
    if actual.as_str() == Some(expected) {
        return Ok(());
    }

    Err(AssertionFailure::ValueMismatch {
        field: field.to_string(),
        expected: expected.to_string(),
        actual: display_value(actual),
    })
}

/// Header presence only; the value is not inspected
pub fn expect_header(resp: &HttpResponse, name: &str) -> Result<(), AssertionFailure> {
    if resp.has_header(name) {
        Ok(())
    } else {
        Err(AssertionFailure::MissingHeader(name.to_string()))
    }
}

/// Render a JSON value for failure messages
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status_code: u16) -> HttpResponse {
        HttpResponse {
            status_code,
            headers: HashMap::from([(
                "access-control-allow-origin".to_string(),
                "*".to_string(),
            )]),
            body: String::new(),
        }
    }

    #[test]
    fn test_expect_status() {
        assert!(expect_status(&response(204), &[200, 204]).is_ok());

        let err = expect_status(&response(405), &[200, 204]).unwrap_err();
        assert_eq!(err.to_string(), "Expected status code 200 or 204, got 405");
    }

    #[test]
    fn test_expect_str_field_mismatch_reports_both_sides() {
        let body = json!({"message": "hello world"});
        let object = expect_object(&body).unwrap();

        let err = expect_str_field(object, "message", "Hello World").unwrap_err();
        assert_eq!(
            err,
            AssertionFailure::ValueMismatch {
                field: "message".to_string(),
                expected: "Hello World".to_string(),
                actual: "'hello world'".to_string(),
            }
        );
    }

    #[test]
    fn test_expect_str_field_rejects_non_string() {
        let body = json!({"message": 1});
        let object = expect_object(&body).unwrap();
        assert!(expect_str_field(object, "message", "1").is_err());
    }

    #[test]
    fn test_expect_field_missing() {
        let body = json!({"msg": "x"});
        let object = expect_object(&body).unwrap();
        assert_eq!(
            expect_field(object, "detail").unwrap_err(),
            AssertionFailure::MissingField("detail".to_string())
        );
    }

    #[test]
    fn test_shape_checks() {
        assert!(expect_object(&json!([1, 2])).is_err());
        assert!(expect_array(&json!({"items": []})).is_err());
        assert_eq!(expect_array(&json!([1, 2])).unwrap().len(), 2);
    }

    #[test]
    fn test_expect_header_is_case_insensitive() {
        let resp = response(200);
        assert!(expect_header(&resp, "Access-Control-Allow-Origin").is_ok());
        assert!(expect_header(&resp, "Access-Control-Allow-Methods").is_err());
    }

    #[test]
    fn test_check_error_kinds() {
        let err: CheckError = AssertionFailure::MissingField("id".to_string()).into();
        assert!(err.is_assertion());

        let err: CheckError = HttpError::Timeout(5).into();
        assert!(!err.is_assertion());
    }
}
